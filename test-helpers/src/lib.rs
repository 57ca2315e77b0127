pub mod stub;

use actix_web::{App, HttpServer, web};
use payloads::APIClient;

/// The bearer token the stub accepts.
pub const TEST_TOKEN: &str = "test-token";

/// Credentials the stub's login endpoint accepts.
pub const TEST_USERNAME: &str = "admin";
pub const TEST_PASSWORD: &str = "password123";

pub struct TestApp {
    pub port: u16,
    pub address: String,
    /// Client with a valid bearer token already attached.
    pub client: APIClient,
    /// Direct handle on the stub's dataset and switches.
    pub db: web::Data<stub::StubDb>,
}

impl TestApp {
    /// A client without credentials, for exercising the 401 paths.
    pub fn anonymous_client(&self) -> APIClient {
        APIClient::new(self.address.clone())
    }
}

/// Start the stub backend on a random port.
pub async fn spawn_app() -> TestApp {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")
        .expect("failed to bind random port");
    let port = listener.local_addr().expect("listener address").port();

    let db = web::Data::new(stub::StubDb::seeded());
    let server_db = db.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(server_db.clone())
            .configure(stub::configure)
    })
    .listen(listener)
    .expect("failed to listen")
    .run();
    tokio::spawn(server);

    let address = format!("http://127.0.0.1:{port}");
    tracing::debug!("stub backend listening on {address}");
    let client = APIClient::new(address.clone()).with_token(TEST_TOKEN);
    TestApp {
        port,
        address,
        client,
        db,
    }
}
