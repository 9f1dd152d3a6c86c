//! JSON-RPC 2.0 communication layer for the host page.
//!
//! In browser builds the scene runs inside an iframe and the host page owns
//! the section modal and the intro overlay. Messages travel over
//! `postMessage` in both directions, supporting request-response and
//! notification patterns.
//!
//! ## Message Flow
//!
//! ```text
//! Host page (parent window)  <──postMessage──>  Bevy (iframe)
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │                                        ├─ dispatch → RpcAction
//!        │ <───────────────── Response (with ID) ─┤
//!        │                                        │
//!        │ <────────── Notification (no ID) ─────┤
//! ```
//!
//! Requests without an ID are still applied; they just get no response.
//!
//! ## Adding New RPC Methods
//!
//! Add a case to `handle_rpc_request()`. Handlers only read the scene through
//! `RpcContext`; anything that changes it is returned as an `RpcAction` and
//! applied by `handle_rpc_messages`.
//!
//! ```rust,ignore
//! "your_method_name" => Ok(RpcOutcome::reply(json!({ "value": 1 }))),
//! ```
//!
//! ## Error Handling
//!
//! Standard JSON-RPC 2.0 error codes:
//! - `-32601`: Method not found
//! - `-32602`: Invalid params (bad payload, unknown or hidden section)
//! - `-32603`: Internal error
//!
//! ## Methods
//!
//! - `set_portfolio_data`: Replace the portfolio; doors are recomputed
//! - `get_visible_sections`: Section keys that currently have a door
//! - `get_camera_phase`: `intro`, `settled` or `unmounted`
//! - `select_section`: Programmatic door click, only for sections with a door
//! - `unmount_scene`: Tear the scene down
//!
//! ## Notifications
//!
//! - `scene_mounted`: Sent after the first door sync, with the visible sections
//! - `section_selected`: A door was clicked
//! - `camera_phase_changed`: The intro shot ended

/// JSON-RPC 2.0 bidirectional communication with the host page.
///
/// Handles request dispatch, notifications, and WASM message listeners.
pub mod web_rpc;
