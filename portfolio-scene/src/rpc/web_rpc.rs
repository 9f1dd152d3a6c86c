use bevy::prelude::*;
use constants::sections::SectionKey;
use serde::{Deserialize, Serialize};

use crate::engine::assets::portfolio_data::PortfolioData;
use crate::engine::camera::choreographer::{CameraChoreographer, CameraPhaseChanged};
use crate::engine::core::app_state::AppState;
use crate::engine::loading::portfolio_loader::PortfolioLoader;
use crate::engine::scene::controller::{SceneDoors, SceneSet};
use crate::error::PortfolioError;
use crate::interaction::door::SectionSelected;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC error structure following specification.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource managing bidirectional RPC communication between the host page and Bevy.
/// Handles both request-response patterns and notification broadcasting.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the host page without expecting response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Queue response for transmission to the host page.
    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Scene change requested by an RPC call, applied by the handling system.
#[derive(Debug, Clone, PartialEq)]
pub enum RpcAction {
    ReplacePortfolio(Box<PortfolioData>),
    SelectSection(SectionKey),
    Unmount,
}

/// Result payload plus the scene change the call asks for.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcOutcome {
    pub result: serde_json::Value,
    pub action: Option<RpcAction>,
}

impl RpcOutcome {
    fn reply(result: serde_json::Value) -> Self {
        Self {
            result,
            action: None,
        }
    }

    fn act(result: serde_json::Value, action: RpcAction) -> Self {
        Self {
            result,
            action: Some(action),
        }
    }
}

/// Read-only view of the scene that request handlers answer from.
pub struct RpcContext<'a> {
    pub doors: Option<&'a SceneDoors>,
    pub choreographer: Option<&'a CameraChoreographer>,
}

/// Plugin establishing WebRPC communication layer for iframe-based deployment.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    announce_scene_mounted,
                    forward_scene_notifications,
                )
                    .chain()
                    .after(SceneSet::Tick),
            )
            .add_systems(Last, send_outgoing_messages);

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    // Thread-safe message queue for cross-thread communication.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        // Filter messages to ensure they contain string data.
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Some(window) = window() {
        if let Err(e) =
            window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
        {
            error!("Failed to register message listener: {:?}", e);
            return;
        }
    }

    // Prevent closure from being dropped by transferring ownership to JS.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing incoming RPC message from the host page.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

fn handle_rpc_messages(
    mut commands: Commands,
    mut events: EventReader<IncomingRpcMessage>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    doors: Option<Res<SceneDoors>>,
    choreographer: Option<Res<CameraChoreographer>>,
    mut selections: EventWriter<SectionSelected>,
    mut next_state: ResMut<NextState<AppState>>,
    mut portfolio_loader: Option<ResMut<PortfolioLoader>>,
) {
    for event in events.read() {
        let request = match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => request,
            Err(parse_error) => {
                warn!("Discarding malformed RPC message: {}", parse_error);
                continue;
            }
        };
        debug!("Processing RPC method: {}", request.method);

        let context = RpcContext {
            doors: doors.as_deref(),
            choreographer: choreographer.as_deref(),
        };
        let outcome = handle_rpc_request(&request, &context);

        if let Ok(RpcOutcome {
            action: Some(action),
            ..
        }) = &outcome
        {
            match action {
                RpcAction::ReplacePortfolio(portfolio) => {
                    if let Some(loader) = portfolio_loader.as_mut() {
                        loader.mark_host_provided();
                    }
                    commands.insert_resource(portfolio.as_ref().clone());
                }
                RpcAction::SelectSection(key) => {
                    selections.write(SectionSelected { key: *key });
                }
                RpcAction::Unmount => next_state.set(AppState::Unmounted),
            }
        }

        // Only generate responses for requests with IDs (notifications have no ID).
        if let Some(id) = request.id.clone() {
            rpc_interface.queue_response(create_response(id, outcome));
        }
    }
}

/// Handle individual RPC request. Pure with respect to the scene: any change
/// is returned as an `RpcAction` for the caller to apply.
pub fn handle_rpc_request(
    request: &RpcRequest,
    context: &RpcContext,
) -> Result<RpcOutcome, RpcError> {
    match request.method.as_str() {
        "set_portfolio_data" => handle_set_portfolio_data(&request.params),
        "get_visible_sections" => Ok(RpcOutcome::reply(serde_json::json!({
            "sections": visible_section_names(context.doors)
        }))),
        "get_camera_phase" => Ok(RpcOutcome::reply(serde_json::json!({
            "phase": context
                .choreographer
                .map_or("unmounted", |c| c.phase().as_str())
        }))),
        "select_section" => handle_select_section(&request.params, context),
        "unmount_scene" => Ok(RpcOutcome::act(
            serde_json::json!({ "success": true }),
            RpcAction::Unmount,
        )),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            Err(RpcError {
                code: -32601,
                message: "Method not found".to_string(),
                data: Some(serde_json::json!({ "method": request.method })),
            })
        }
    }
}

/// Replace the scene's portfolio. Accepts either the document itself or
/// `{ "portfolio": document }`.
fn handle_set_portfolio_data(params: &serde_json::Value) -> Result<RpcOutcome, RpcError> {
    let document = params.get("portfolio").unwrap_or(params).clone();
    let portfolio = PortfolioData::from_json_value(document)?;
    info!("Portfolio replaced via RPC");

    Ok(RpcOutcome::act(
        serde_json::json!({ "success": true }),
        RpcAction::ReplacePortfolio(Box::new(portfolio)),
    ))
}

/// Programmatic door click. Only sections that currently have a door can be selected.
fn handle_select_section(
    params: &serde_json::Value,
    context: &RpcContext,
) -> Result<RpcOutcome, RpcError> {
    #[derive(serde::Deserialize)]
    struct SelectSectionParams {
        section: String,
    }

    let parsed = serde_json::from_value::<SelectSectionParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'section' parameter"))?;

    let key = SectionKey::from_string(&parsed.section)
        .ok_or(PortfolioError::UnknownSection(parsed.section))?;

    if !context.doors.is_some_and(|doors| doors.contains(key)) {
        return Err(PortfolioError::SectionHidden(key.as_str()).into());
    }

    Ok(RpcOutcome::act(
        serde_json::json!({ "success": true, "section": key.as_str() }),
        RpcAction::SelectSection(key),
    ))
}

fn visible_section_names(doors: Option<&SceneDoors>) -> Vec<&'static str> {
    doors
        .map(|doors| doors.keys().into_iter().map(|key| key.as_str()).collect())
        .unwrap_or_default()
}

fn create_response(id: serde_json::Value, outcome: Result<RpcOutcome, RpcError>) -> RpcResponse {
    match outcome {
        Ok(outcome) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(outcome.result),
            error: None,
            id: Some(id),
        },
        Err(error) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        },
    }
}

/// Relays the scene's outward events to the host page, which owns the section
/// modal and the intro overlay in browser builds.
pub fn forward_scene_notifications(
    mut selections: EventReader<SectionSelected>,
    mut phases: EventReader<CameraPhaseChanged>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for selection in selections.read() {
        rpc_interface.send_notification(
            "section_selected",
            serde_json::json!({ "section": selection.key.as_str() }),
        );
    }
    for change in phases.read() {
        rpc_interface.send_notification(
            "camera_phase_changed",
            serde_json::json!({ "phase": change.phase.as_str() }),
        );
    }
}

/// Announces the door set once per mount, after the first door sync.
fn announce_scene_mounted(
    doors: Option<Res<SceneDoors>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let Some(doors) = doors else {
        return;
    };
    if doors.is_added() {
        rpc_interface.send_notification(
            "scene_mounted",
            serde_json::json!({ "sections": visible_section_names(Some(&*doors)) }),
        );
    }
}

/// Send queued notifications and responses to the host page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    // Send notifications first.
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    // Send responses second to maintain order.
    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to parent window (host page).
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Ok(json) = serde_json::to_string(message) {
            debug!("RPC → host (no parent outside the browser): {}", json);
        }
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self {
            code: -32603,
            message: message.to_string(),
            data: None,
        }
    }
}

impl From<PortfolioError> for RpcError {
    fn from(error: PortfolioError) -> Self {
        match error {
            PortfolioError::AssetLoad { .. } => Self::internal_error(&error.to_string()),
            _ => Self::invalid_params(&error.to_string()),
        }
    }
}
