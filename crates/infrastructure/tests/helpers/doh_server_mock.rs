use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{RData, Record};
use hickory_proto::serialize::binary::BinEncodable;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Address handed out by [`MockDoh::answering`].
pub const MOCK_ANSWER_IP: Ipv4Addr = Ipv4Addr::new(93, 184, 216, 34);

/// What the mock sends back for one request.
pub struct MockReply {
    pub status: u16,
    pub body: Vec<u8>,
}

type Responder = dyn Fn(&[u8]) -> MockReply + Send + Sync;

#[derive(Clone)]
struct MockState {
    responder: Arc<Responder>,
    requests: Arc<AtomicUsize>,
    content_types: Arc<Mutex<Vec<String>>>,
}

/// DoH endpoint on localhost serving `POST /dns-query`.
pub struct MockDoh {
    addr: SocketAddr,
    requests: Arc<AtomicUsize>,
    content_types: Arc<Mutex<Vec<String>>>,
    task: JoinHandle<()>,
}

impl MockDoh {
    pub async fn start<F>(responder: F) -> Self
    where
        F: Fn(&[u8]) -> MockReply + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = MockState {
            responder: Arc::new(responder),
            requests: Arc::new(AtomicUsize::new(0)),
            content_types: Arc::new(Mutex::new(Vec::new())),
        };
        let requests = Arc::clone(&state.requests);
        let content_types = Arc::clone(&state.content_types);

        let app = Router::new()
            .route("/dns-query", post(dns_query))
            .with_state(state);

        let task = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            requests,
            content_types,
            task,
        }
    }

    /// Answers every query with one `A` record carrying `ttl`.
    pub async fn answering(ttl: u32) -> Self {
        Self::start(move |body| MockReply {
            status: 200,
            body: answer(body, Some(ttl)),
        })
        .await
    }

    /// Answers NOERROR with an empty answer section.
    pub async fn empty() -> Self {
        Self::start(|body| MockReply {
            status: 200,
            body: answer(body, None),
        })
        .await
    }

    pub async fn status(status: u16) -> Self {
        Self::start(move |_| MockReply {
            status,
            body: Vec::new(),
        })
        .await
    }

    pub async fn garbage() -> Self {
        Self::start(|_| MockReply {
            status: 200,
            body: b"definitely not dns".to_vec(),
        })
        .await
    }

    pub fn url(&self) -> String {
        format!("http://{}/dns-query", self.addr)
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn content_types(&self) -> Vec<String> {
        self.content_types.lock().unwrap().clone()
    }
}

impl Drop for MockDoh {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// HTTP client that talks to the mock directly, ignoring proxy variables.
pub fn local_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// Reply to the DNS query in `body`, echoing its id and question.
pub fn answer(body: &[u8], ttl: Option<u32>) -> Vec<u8> {
    let query = Message::from_vec(body).unwrap();

    let mut response = Message::new();
    response
        .set_id(query.id())
        .set_message_type(MessageType::Response)
        .set_op_code(query.op_code())
        .set_recursion_desired(query.recursion_desired())
        .set_recursion_available(true)
        .set_response_code(ResponseCode::NoError);

    for question in query.queries() {
        response.add_query(question.clone());
        if let Some(ttl) = ttl {
            response.add_answer(Record::from_rdata(
                question.name().clone(),
                ttl,
                RData::A(A(MOCK_ANSWER_IP)),
            ));
        }
    }

    response.to_bytes().unwrap()
}

async fn dns_query(
    State(state): State<MockState>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    state.requests.fetch_add(1, Ordering::SeqCst);
    if let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    {
        state
            .content_types
            .lock()
            .unwrap()
            .push(content_type.to_string());
    }

    let reply = (state.responder)(&body);
    (
        StatusCode::from_u16(reply.status).unwrap(),
        [(header::CONTENT_TYPE, "application/dns-message")],
        reply.body,
    )
}
