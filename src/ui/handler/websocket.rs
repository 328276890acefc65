//! WebSocket connection handlers.
//!
//! Per-connection lifecycle: `Unjoined → Joined(room, member) → Closed`.
//! Each inbound frame is parsed into a [`ClientMessage`] at this boundary
//! and dispatched to the matching usecase; malformed or unknown payloads are
//! dropped with a diagnostic, never partially processed. Outbound messages
//! are fanned out over per-connection channels according to the targets the
//! usecases return.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ChatText, ConnectionId, DisplayName, DrawElement, MemberId, RoomCode},
    infrastructure::dto::websocket::{ClientMessage, MemberInfo, ServerMessage},
    ui::state::{AppState, ConnectionHandle},
    usecase::{
        DisconnectMemberUseCase, DisconnectOutcome, DrawError, JoinError, JoinRequest,
        JoinRoomUseCase, PermissionOutcome, RelayDrawUseCase, ReplaceBoardUseCase,
        SendChatUseCase, UpdatePermissionUseCase,
    },
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionId::generate();
    let (mut sender, mut receiver) = socket.split();

    // Create a channel for this connection to receive addressed messages
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    {
        let mut connections = state.connections.lock().await;
        connections.insert(connection_id, ConnectionHandle { sender: tx });
    }
    tracing::info!("connection '{}' opened", connection_id);

    // Spawn a task to forward addressed messages to this connection
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    // Spawn a task to receive and dispatch messages from this connection
    let recv_state = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error on '{}': {}", connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(client_msg) => dispatch(&recv_state, connection_id, client_msg).await,
                    Err(e) => {
                        tracing::warn!(
                            "dropping malformed message from '{}': {}",
                            connection_id,
                            e
                        );
                    }
                },
                Message::Ping(_) => {
                    tracing::debug!("received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("connection '{}' requested close", connection_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    handle_disconnect(&state, connection_id).await;

    let mut connections = state.connections.lock().await;
    connections.remove(&connection_id);
    tracing::info!("connection '{}' closed", connection_id);
}

/// Route one validated inbound message to its usecase.
async fn dispatch(state: &Arc<AppState>, connection_id: ConnectionId, message: ClientMessage) {
    match message {
        ClientMessage::Join {
            name,
            room_id,
            member_id,
            host,
        } => handle_join(state, connection_id, name, room_id, member_id, host).await,
        ClientMessage::SetPermission {
            room_id,
            target_member_id,
            can_draw,
        } => handle_set_permission(state, connection_id, room_id, target_member_id, can_draw).await,
        ClientMessage::DrawElement { room_id, element } => {
            handle_draw_element(state, connection_id, room_id, element).await
        }
        ClientMessage::BoardReplace { room_id, elements } => {
            handle_board_replace(state, connection_id, room_id, elements).await
        }
        ClientMessage::BoardClear { room_id } => {
            handle_board_clear(state, connection_id, room_id).await
        }
        ClientMessage::ChatMessage { text } => handle_chat(state, connection_id, text).await,
        ClientMessage::TypingStart => handle_typing(state, connection_id, true).await,
        ClientMessage::TypingStop => handle_typing(state, connection_id, false).await,
    }
}

async fn handle_join(
    state: &Arc<AppState>,
    connection_id: ConnectionId,
    name: String,
    room_id: String,
    member_id: String,
    host: bool,
) {
    // Convert String -> Domain Models; invalid fields drop the event
    let (name, room_id, member_id) = match (
        DisplayName::new(name),
        RoomCode::new(room_id),
        MemberId::new(member_id),
    ) {
        (Ok(name), Ok(room_id), Ok(member_id)) => (name, room_id, member_id),
        _ => {
            tracing::warn!("dropping join with invalid fields from '{}'", connection_id);
            return;
        }
    };

    let usecase = JoinRoomUseCase::new(
        state.registry.clone(),
        state.directory.clone(),
        state.session_lock.clone(),
    );
    let request = JoinRequest {
        name,
        room_id,
        member_id,
        host,
    };

    match usecase.execute(connection_id, request).await {
        Ok(outcome) => {
            tracing::info!(
                "member '{}' joined room '{}' as {} on '{}'",
                outcome.member.member_id,
                outcome.member.room_id,
                if outcome.member.is_host { "host" } else { "guest" },
                connection_id
            );

            // Confirm to the joiner
            state
                .unicast(
                    &connection_id,
                    &ServerMessage::Joined {
                        name: outcome.member.display_name.as_str().to_string(),
                        room_id: outcome.member.room_id.as_str().to_string(),
                        member_id: outcome.member.member_id.as_str().to_string(),
                        is_host: outcome.member.is_host,
                        can_draw: outcome.member.can_draw,
                    },
                )
                .await;

            // Updated roster to the whole room (joiner included)
            let room_targets: Vec<ConnectionId> =
                outcome.roster.iter().map(|m| m.connection_id).collect();
            state
                .multicast(
                    &room_targets,
                    &ServerMessage::MemberList {
                        members: MemberInfo::roster(outcome.roster),
                    },
                )
                .await;

            // Notify everyone except the joiner
            state
                .multicast(
                    &outcome.notify_targets,
                    &ServerMessage::MemberJoined {
                        name: outcome.member.display_name.into_string(),
                    },
                )
                .await;

            // Late joiners receive the current board
            if let Some(elements) = outcome.board {
                state
                    .unicast(&connection_id, &ServerMessage::BoardReplaced { elements })
                    .await;
            }
        }
        Err(JoinError::RoomExists(room)) => {
            tracing::info!("host join of '{}' rejected, room exists", room);
            state.unicast(&connection_id, &ServerMessage::RoomExists).await;
        }
        Err(JoinError::RoomNotFound(room)) => {
            tracing::info!("guest join of '{}' rejected, room not found", room);
            state
                .unicast(&connection_id, &ServerMessage::RoomNotFound)
                .await;
        }
        Err(e @ (JoinError::AlreadyJoined | JoinError::DuplicateMember { .. })) => {
            tracing::warn!("dropping join from '{}': {}", connection_id, e);
        }
    }
}

async fn handle_set_permission(
    state: &Arc<AppState>,
    connection_id: ConnectionId,
    room_id: String,
    target_member_id: String,
    can_draw: bool,
) {
    let (room_id, target_member_id) = match (RoomCode::new(room_id), MemberId::new(target_member_id))
    {
        (Ok(room_id), Ok(target_member_id)) => (room_id, target_member_id),
        _ => {
            tracing::warn!(
                "dropping set-permission with invalid fields from '{}'",
                connection_id
            );
            return;
        }
    };

    let usecase = UpdatePermissionUseCase::new(state.registry.clone(), state.session_lock.clone());
    match usecase
        .execute(connection_id, room_id, target_member_id, can_draw)
        .await
    {
        PermissionOutcome::Applied {
            roster,
            room_targets,
            target_connection,
            can_draw,
        } => {
            state
                .multicast(
                    &room_targets,
                    &ServerMessage::MemberList {
                        members: MemberInfo::roster(roster),
                    },
                )
                .await;

            // Tell the affected member directly so its client can update
            // local authorization state without re-deriving it from the list
            if let Some(target) = target_connection {
                state
                    .unicast(&target, &ServerMessage::PermissionChanged { can_draw })
                    .await;
            }
        }
        PermissionOutcome::Denied => {
            // Denied action, not a protocol error: no broadcast, no reply
            tracing::warn!(
                "ignoring set-permission from non-host connection '{}'",
                connection_id
            );
        }
    }
}

async fn handle_draw_element(
    state: &Arc<AppState>,
    connection_id: ConnectionId,
    room_id: String,
    element: DrawElement,
) {
    let Ok(room_id) = RoomCode::new(room_id) else {
        tracing::warn!(
            "dropping draw-element with invalid room from '{}'",
            connection_id
        );
        return;
    };

    let usecase = RelayDrawUseCase::new(
        state.registry.clone(),
        state.directory.clone(),
        state.session_lock.clone(),
    );
    match usecase.execute(connection_id, room_id, element.clone()).await {
        Ok(targets) => {
            state
                .multicast(&targets, &ServerMessage::ElementReceived { element })
                .await;
        }
        Err(DrawError::NotAuthorized) => {
            state
                .unicast(&connection_id, &ServerMessage::PermissionDenied)
                .await;
        }
        Err(e) => {
            tracing::warn!("dropping draw-element from '{}': {}", connection_id, e);
        }
    }
}

async fn handle_board_replace(
    state: &Arc<AppState>,
    connection_id: ConnectionId,
    room_id: String,
    elements: Vec<DrawElement>,
) {
    let Ok(room_id) = RoomCode::new(room_id) else {
        tracing::warn!(
            "dropping board-replace with invalid room from '{}'",
            connection_id
        );
        return;
    };

    let usecase = ReplaceBoardUseCase::new(
        state.registry.clone(),
        state.directory.clone(),
        state.session_lock.clone(),
    );
    match usecase
        .replace(connection_id, room_id, elements.clone())
        .await
    {
        Ok(targets) => {
            state
                .multicast(&targets, &ServerMessage::BoardReplaced { elements })
                .await;
        }
        Err(crate::usecase::BoardError::NotAuthorized) => {
            state
                .unicast(&connection_id, &ServerMessage::PermissionDenied)
                .await;
        }
        Err(e) => {
            tracing::warn!("dropping board-replace from '{}': {}", connection_id, e);
        }
    }
}

async fn handle_board_clear(state: &Arc<AppState>, connection_id: ConnectionId, room_id: String) {
    let Ok(room_id) = RoomCode::new(room_id) else {
        tracing::warn!(
            "dropping board-clear with invalid room from '{}'",
            connection_id
        );
        return;
    };

    let usecase = ReplaceBoardUseCase::new(
        state.registry.clone(),
        state.directory.clone(),
        state.session_lock.clone(),
    );
    match usecase.clear(connection_id, room_id).await {
        Ok(targets) => {
            state.multicast(&targets, &ServerMessage::BoardCleared).await;
        }
        Err(crate::usecase::BoardError::NotAuthorized) => {
            state
                .unicast(&connection_id, &ServerMessage::PermissionDenied)
                .await;
        }
        Err(e) => {
            tracing::warn!("dropping board-clear from '{}': {}", connection_id, e);
        }
    }
}

async fn handle_chat(state: &Arc<AppState>, connection_id: ConnectionId, text: String) {
    let Ok(text) = ChatText::new(text) else {
        tracing::warn!(
            "dropping chat message with invalid text from '{}'",
            connection_id
        );
        return;
    };

    let usecase = SendChatUseCase::new(state.registry.clone(), state.session_lock.clone());
    match usecase.relay_targets(connection_id).await {
        Ok(outcome) => {
            state
                .multicast(
                    &outcome.targets,
                    &ServerMessage::ChatReceived {
                        text: text.into_string(),
                        name: outcome.sender_name.into_string(),
                    },
                )
                .await;
        }
        Err(e) => {
            tracing::warn!("dropping chat message from '{}': {}", connection_id, e);
        }
    }
}

async fn handle_typing(state: &Arc<AppState>, connection_id: ConnectionId, started: bool) {
    let usecase = SendChatUseCase::new(state.registry.clone(), state.session_lock.clone());
    match usecase.relay_targets(connection_id).await {
        Ok(outcome) => {
            let message = if started {
                ServerMessage::TypingStarted {
                    name: outcome.sender_name.into_string(),
                }
            } else {
                ServerMessage::TypingStopped
            };
            state.multicast(&outcome.targets, &message).await;
        }
        Err(e) => {
            tracing::debug!("dropping typing indicator from '{}': {}", connection_id, e);
        }
    }
}

/// Cleanup after the connection ends, however it ended.
async fn handle_disconnect(state: &Arc<AppState>, connection_id: ConnectionId) {
    let usecase = DisconnectMemberUseCase::new(
        state.registry.clone(),
        state.directory.clone(),
        state.session_lock.clone(),
    );
    match usecase.execute(connection_id).await {
        DisconnectOutcome::NotJoined => {
            tracing::debug!("connection '{}' left without joining a room", connection_id);
        }
        DisconnectOutcome::RoomClosed { member } => {
            tracing::info!(
                "room '{}' closed after its last member '{}' left",
                member.room_id,
                member.member_id
            );
        }
        DisconnectOutcome::Departed {
            member,
            roster,
            notify_targets,
        } => {
            tracing::info!(
                "member '{}' left room '{}', {} member(s) remain",
                member.member_id,
                member.room_id,
                roster.len()
            );
            state
                .multicast(
                    &notify_targets,
                    &ServerMessage::MemberList {
                        members: MemberInfo::roster(roster),
                    },
                )
                .await;
            state
                .multicast(
                    &notify_targets,
                    &ServerMessage::MemberLeft {
                        name: member.display_name.into_string(),
                    },
                )
                .await;
        }
    }
}
