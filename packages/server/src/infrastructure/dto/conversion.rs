//! Conversion logic between DTOs and domain entities.

use hubbub_shared::time::{format_clock_time, format_uptime};

use crate::domain::{entity, value_object::Identity};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// Domain Entity → DTO
// ========================================

impl From<entity::ChatMessage> for dto::ChatData {
    fn from(model: entity::ChatMessage) -> Self {
        Self {
            text: model.text.into_string(),
            from: model.from,
            time: format_clock_time(&model.sent_at),
        }
    }
}

impl From<entity::SignalEnvelope> for dto::SignalData {
    fn from(model: entity::SignalEnvelope) -> Self {
        Self {
            kind: model.kind.as_str().to_string(),
            from: model.from.into_string(),
            to: model.to.into_string(),
            payload: model.payload,
        }
    }
}

impl From<entity::ServiceInfo> for http::ServiceInfoDto {
    fn from(model: entity::ServiceInfo) -> Self {
        Self {
            version: model.version,
            start_time: model.started_at.to_rfc3339(),
            uptime: format_uptime(model.uptime),
            online_users: model.online_users,
        }
    }
}

/// Render a roster as the comma-joined `users` frame text
pub fn roster_text<'a>(identities: impl IntoIterator<Item = &'a Identity>) -> String {
    identities
        .into_iter()
        .map(Identity::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MessageText, SignalKind};
    use chrono::{Local, TimeZone};
    use serde_json::value::RawValue;
    use std::{collections::BTreeSet, time::Duration};

    #[test]
    fn test_domain_chat_message_to_dto() {
        // テスト項目: ドメインの ChatMessage が時刻 HH:MM:SS 付きの DTO に変換される
        // given (前提条件):
        let sent_at = Local.with_ymd_and_hms(2026, 3, 4, 13, 2, 9).unwrap();
        let message = entity::ChatMessage::new(
            MessageText::new("hi".to_string()).unwrap(),
            "C",
            sent_at,
        );

        // when (操作):
        let data: dto::ChatData = message.into();

        // then (期待する結果):
        assert_eq!(data.text, "hi");
        assert_eq!(data.from, "C");
        assert_eq!(data.time, "13:02:09");
    }

    #[test]
    fn test_domain_signal_to_dto_keeps_payload_bytes() {
        // テスト項目: シグナリングの payload がバイト単位でそのまま DTO に渡される
        // given (前提条件):
        let payload = RawValue::from_string(r#"{"sdp":"v=0","z":1,"a":[]}"#.to_string()).unwrap();
        let envelope = entity::SignalEnvelope {
            kind: SignalKind::new("offer".to_string()).unwrap(),
            from: Identity::new("A".to_string()).unwrap(),
            to: Identity::new("C".to_string()).unwrap(),
            payload: Some(payload),
        };

        // when (操作):
        let data: dto::SignalData = envelope.into();
        let json = serde_json::to_string(&data).unwrap();

        // then (期待する結果):
        assert_eq!(
            json,
            r#"{"type":"offer","from":"A","to":"C","payload":{"sdp":"v=0","z":1,"a":[]}}"#
        );
    }

    #[test]
    fn test_domain_service_info_to_dto() {
        // テスト項目: ServiceInfo が RFC 3339 の起動時刻と稼働時間文字列に変換される
        // given (前提条件):
        let started_at = Local.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let info = entity::ServiceInfo {
            version: "0.1.0".to_string(),
            started_at,
            uptime: Duration::from_secs(125),
            online_users: 2,
        };

        // when (操作):
        let dto: http::ServiceInfoDto = info.into();

        // then (期待する結果):
        assert_eq!(dto.start_time, started_at.to_rfc3339());
        assert_eq!(dto.uptime, "2m5s");
        assert_eq!(dto.online_users, 2);
    }

    #[test]
    fn test_roster_text_is_comma_joined() {
        // テスト項目: 名簿がカンマ区切りの文字列になる
        // given (前提条件):
        let roster: BTreeSet<Identity> = ["B", "A", "C"]
            .into_iter()
            .map(|s| Identity::new(s.to_string()).unwrap())
            .collect();

        // when (操作):
        let text = roster_text(&roster);

        // then (期待する結果):
        assert_eq!(text, "A,B,C");
        assert_eq!(roster_text(&BTreeSet::<Identity>::new()), "");
    }
}
