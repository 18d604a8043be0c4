//! # Frame Navigation Payload
//!
//! The fixed parameter set a processor-hosted tokenization page accepts.
//! Key names are part of the wire contract with the hosted page and are
//! spelled exactly as the processor expects them.

use bridge_core::Payload;
use serde::Serialize;

/// Parameters forwarded to the hosted page as the frame navigates
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FramePayload {
    /// Subscription or session identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_uuid: Option<String>,

    /// ISO country code of the shopper
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,

    /// Locale shown by the hosted page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shopper_locale: Option<String>,

    /// ISO currency code of the charge
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,

    /// Skin/style identifier of the hosted page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skin_code: Option<String>,
}

impl FramePayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the subscription identifier
    pub fn with_subscription_uuid(mut self, value: impl Into<String>) -> Self {
        self.subscription_uuid = Some(value.into());
        self
    }

    /// Builder: set the shopper country code
    pub fn with_country_code(mut self, value: impl Into<String>) -> Self {
        self.country_code = Some(value.into());
        self
    }

    /// Builder: set the shopper locale
    pub fn with_shopper_locale(mut self, value: impl Into<String>) -> Self {
        self.shopper_locale = Some(value.into());
        self
    }

    /// Builder: set the currency code
    pub fn with_currency_code(mut self, value: impl Into<String>) -> Self {
        self.currency_code = Some(value.into());
        self
    }

    /// Builder: set the skin code
    pub fn with_skin_code(mut self, value: impl Into<String>) -> Self {
        self.skin_code = Some(value.into());
        self
    }

    /// Encode into navigation parameters, omitting unset fields.
    /// Key spelling here is the wire contract.
    pub fn into_params(self) -> Payload {
        let mut params = Payload::new();
        if let Some(v) = self.subscription_uuid {
            params.set("subscriptionUuid", v);
        }
        if let Some(v) = self.country_code {
            params.set("countryCode", v);
        }
        if let Some(v) = self.shopper_locale {
            params.set("shopperLocale", v);
        }
        if let Some(v) = self.currency_code {
            params.set("currencyCode", v);
        }
        if let Some(v) = self.skin_code {
            params.set("skinCode", v);
        }
        params
    }
}
