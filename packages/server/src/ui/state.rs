//! Shared application state.

use std::sync::Arc;

use crate::usecase::{
    ConnectParticipantUseCase, DisconnectParticipantUseCase, GetServiceInfoUseCase,
    RelaySignalUseCase, SendMessageUseCase,
};

/// Shared application state
pub struct AppState {
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    pub send_message_usecase: Arc<SendMessageUseCase>,
    pub relay_signal_usecase: Arc<RelaySignalUseCase>,
    pub get_service_info_usecase: Arc<GetServiceInfoUseCase>,
}
