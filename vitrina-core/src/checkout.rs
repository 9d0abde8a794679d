//! Checkout deep-link composer
//!
//! Pure templating: product -> `https://<host>/<phone>?text=<encoded message>`.

use crate::config::MerchantConfig;
use shared::Product;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutLinkComposer {
    merchant: MerchantConfig,
}

impl CheckoutLinkComposer {
    pub fn new(merchant: MerchantConfig) -> Self {
        Self { merchant }
    }

    pub fn merchant(&self) -> &MerchantConfig {
        &self.merchant
    }

    /// Order message before URL encoding
    pub fn message(&self, product: &Product) -> String {
        format!(
            "Hola {}, estoy interesado en este producto:\n\n🛍 Producto: {}\n💵 Precio: {}\n\n¿Podrías darme más información?",
            self.merchant.name,
            product.name,
            product.display_price()
        )
    }

    /// Deep link that opens a chat with the order message prefilled
    pub fn link(&self, product: &Product) -> String {
        format!(
            "https://{}/{}?text={}",
            self.merchant.messaging_host,
            self.merchant.phone,
            urlencoding::encode(&self.message(product))
        )
    }
}

impl Default for CheckoutLinkComposer {
    fn default() -> Self {
        Self::new(MerchantConfig::default())
    }
}
