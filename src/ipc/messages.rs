//! Notification messages sent to the rendering process

use serde::{Deserialize, Serialize};

use crate::config::{BoolId, FloatId, IntId, WireId};

/// Settings change notification
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum ConfigMessage {
    /// A setting changed; `param` is the identifier's wire parameter
    SetConfig { param: u32, value: i64 },

    /// Float settings travel as their bit pattern so the receiver can
    /// restore the exact value
    SetConfigFloat { param: u32, bits: u32 },
}

impl ConfigMessage {
    pub fn set_bool(id: BoolId, value: bool) -> Self {
        ConfigMessage::SetConfig {
            param: WireId::from(id).param(),
            value: i64::from(value),
        }
    }

    pub fn set_int(id: IntId, value: i32) -> Self {
        ConfigMessage::SetConfig {
            param: WireId::from(id).param(),
            value: i64::from(value),
        }
    }

    pub fn set_float(id: FloatId, value: f32) -> Self {
        ConfigMessage::SetConfigFloat {
            param: WireId::from(id).param(),
            bits: value.to_bits(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_int_addresses_int_id() {
        let msg = ConfigMessage::set_int(IntId::OverlayCaptureSource, 2);
        let param = WireId::from(IntId::OverlayCaptureSource).param();
        assert_eq!(msg, ConfigMessage::SetConfig { param, value: 2 });
    }

    #[test]
    fn test_set_float_keeps_bits() {
        let msg = ConfigMessage::set_float(FloatId::OverlayWidth, 1.65);
        let ConfigMessage::SetConfigFloat { bits, .. } = msg else {
            panic!("expected float message");
        };
        assert_eq!(f32::from_bits(bits), 1.65);
    }

    #[test]
    fn test_json_shape() {
        let msg = ConfigMessage::set_bool(BoolId::OverlayNameCustom, true);
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"SetConfig":{"param":0,"value":1}}"#);
    }
}
