//! WebSocket Real-Time Streaming
//!
//! Pushes live screen updates to connected clients.
//!
//! ## Topics
//!
//! - `ticket` - Live ticket countdown frames
//! - `clock` - Operator dashboard date line
//! - `dashboard` - Salon dashboard state after each change
//! - `notices` - Toasts
//! - `system` - View changes
//! - `*` - Everything
//!
//! ## Example
//!
//! ```javascript
//! const ws = new WebSocket('ws://localhost:8086/ws');
//!
//! ws.onopen = () => {
//!   ws.send(JSON.stringify({type: 'subscribe', topics: ['ticket', 'notices']}));
//! };
//!
//! ws.onmessage = (event) => {
//!   const msg = JSON.parse(event.data);
//!   console.log('Received:', msg);
//! };
//! ```

mod handler;
mod hub;
mod messages;

pub use handler::websocket_handler;
pub use hub::{ConnectionHub, HubConfig, HubError};
pub use messages::{
    ClientMessage, ServerMessage, WsEvent, TOPIC_ALL, TOPIC_CLOCK, TOPIC_DASHBOARD, TOPIC_NOTICES,
    TOPIC_SYSTEM, TOPIC_TICKET,
};
