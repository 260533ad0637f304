pub mod codec;
pub mod handler;
pub mod router;
pub mod server;

pub use handler::CalendarHandler;
pub use server::CalendarServer;
