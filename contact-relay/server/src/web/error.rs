use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Error occurs while binding TCP server on {listen_address}, error: {source}"))]
    BindTcpServer { listen_address: std::net::SocketAddr, source: std::io::Error },

    #[snafu(display("Error occurs while serving HTTP server, error: {source}"))]
    ServeHttpServer { source: std::io::Error },

    #[snafu(display("Invalid CORS origin `{origin}`, error: {source}"))]
    InvalidCorsOrigin { origin: String, source: http::header::InvalidHeaderValue },
}
