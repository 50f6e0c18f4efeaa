//! Recording fakes for the RDAP and DNS client ports

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use netgraph_resolver::features::dns::{DnsClient, DnsClientError, DnsRecord, RecordType};
use netgraph_resolver::features::http::{HeadResponse, HttpClient, HttpClientError};
use netgraph_resolver::features::rdap::{
    ClientError, RdapClient, RdapObject, RdapRequest, RdapResponse, RequestKind,
};

type RdapKey = (RequestKind, String);

/// RDAP client answering from a fixed table
///
/// Unknown requests answer "object does not exist". With `hang` set, every
/// request stays pending forever.
#[derive(Default)]
pub struct FakeRdapClient {
    responses: Mutex<HashMap<RdapKey, Result<RdapResponse, ClientError>>>,
    requests: Mutex<Vec<RdapRequest>>,
    hang: AtomicBool,
}

impl FakeRdapClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, kind: RequestKind, query: &str, object: RdapObject) -> Self {
        let url = format!("https://rdap.example.net/{}/{}", kind, query);
        self.respond_with(kind, query, Ok(RdapResponse::new(object).with_url(url)))
    }

    pub fn respond_with(
        self,
        kind: RequestKind,
        query: &str,
        response: Result<RdapResponse, ClientError>,
    ) -> Self {
        self.responses
            .lock()
            .insert((kind, query.to_string()), response);
        self
    }

    pub fn hang(&self, hang: bool) {
        self.hang.store(hang, Ordering::SeqCst);
    }

    pub fn requests(&self) -> Vec<RdapRequest> {
        self.requests.lock().clone()
    }

    pub fn queries(&self) -> Vec<String> {
        self.requests.lock().iter().map(|r| r.query.clone()).collect()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl RdapClient for FakeRdapClient {
    async fn execute(&self, request: RdapRequest) -> Result<RdapResponse, ClientError> {
        self.requests.lock().push(request.clone());

        if self.hang.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }

        let response = self
            .responses
            .lock()
            .get(&(request.kind, request.query.clone()))
            .cloned();

        response.unwrap_or_else(|| {
            Err(ClientError::does_not_exist(format!(
                "{} {} not found",
                request.kind, request.query
            )))
        })
    }
}

/// DNS client answering from a fixed zone; unknown names have no answers
#[derive(Default)]
pub struct FakeDnsClient {
    zone: Mutex<HashMap<(String, RecordType), Vec<DnsRecord>>>,
    questions: Mutex<Vec<(String, RecordType)>>,
    down: AtomicBool,
}

impl FakeDnsClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(self, name: &str, record_type: RecordType, records: Vec<DnsRecord>) -> Self {
        self.zone
            .lock()
            .insert((name.to_string(), record_type), records);
        self
    }

    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    pub fn questions(&self) -> Vec<(String, RecordType)> {
        self.questions.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.questions.lock().len()
    }
}

#[async_trait]
impl DnsClient for FakeDnsClient {
    async fn query(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<DnsRecord>, DnsClientError> {
        self.questions.lock().push((name.to_string(), record_type));

        if self.down.load(Ordering::SeqCst) {
            return Err(DnsClientError::NoServersAvailable);
        }

        Ok(self
            .zone
            .lock()
            .get(&(name.to_string(), record_type))
            .cloned()
            .unwrap_or_default())
    }
}

/// HTTP client answering from a fixed site map; unknown URLs fail to connect
#[derive(Default)]
pub struct FakeHttpClient {
    pages: Mutex<HashMap<String, HeadResponse>>,
    requests: Mutex<Vec<String>>,
}

impl FakeHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(self, url: &str, response: HeadResponse) -> Self {
        self.pages.lock().insert(url.to_string(), response);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl HttpClient for FakeHttpClient {
    async fn head(&self, url: &str) -> Result<HeadResponse, HttpClientError> {
        self.requests.lock().push(url.to_string());

        let response = self.pages.lock().get(url).cloned();
        response.ok_or_else(|| HttpClientError::Request {
            url: url.to_string(),
            message: "connection refused".to_string(),
        })
    }
}
