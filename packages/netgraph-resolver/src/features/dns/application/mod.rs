pub mod answers;
pub mod names;

pub use answers::{answers_to_items, group_answers, AnswerGroup};
pub use names::{fqdn, reverse_name, trim_dns_suffix};
