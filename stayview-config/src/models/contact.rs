use serde::{Deserialize, Serialize};
use stayview_core::links::{WhatsAppLink, format_phone};

/// How visitors reach the front desk.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ContactConfig {
    /// WhatsApp number; any formatting is stripped when building links.
    pub whatsapp_number: String,
    /// Prefilled chat text for the floating WhatsApp button.
    pub default_message: String,
    /// Phone number shown on pages (`tel:` links use it as-is).
    pub phone: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            whatsapp_number: "9607860882".into(),
            default_message: "Hello! Please share availability & rates.".into(),
            phone: "+9607860882".into(),
        }
    }
}

impl ContactConfig {
    pub fn whatsapp(&self, message: Option<&str>) -> stayview_core::Result<WhatsAppLink> {
        WhatsAppLink::new(
            &self.whatsapp_number,
            message.unwrap_or(&self.default_message),
        )
    }

    pub fn display_phone(&self) -> String {
        format_phone(&self.phone)
    }
}
