mod server;
mod test_delivery;

pub use self::{server::run_server, test_delivery::run_test_delivery};
