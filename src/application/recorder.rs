//! Alert Recorder
//!
//! Intake pipeline for one price alert: quantize the price, resolve product
//! fields from the page context, persist, and build the confirmation text.

use tracing::info;

use crate::domain::context::{product_fields, RequestContext};
use crate::domain::errors::ValidationError;
use crate::domain::price::{DesiredPrice, PriceInput};
use crate::persistence::models::NewPriceAlert;
use crate::persistence::repository::AlertRepository;
use crate::persistence::PersistenceError;

/// Why a submission was not recorded.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Persistence(#[from] PersistenceError),
}

/// Records price alerts. Cloning shares the underlying repository.
#[derive(Clone)]
pub struct AlertRecorder {
    repository: AlertRepository,
}

impl AlertRecorder {
    pub fn new(repository: AlertRepository) -> Self {
        Self { repository }
    }

    /// Record one alert and return the shopper-facing confirmation.
    ///
    /// The price is quantized before anything touches the store; an
    /// unparsable price never opens a transaction. `ctx` is `None` when the
    /// recorder runs outside an interactive request.
    pub async fn record(
        &self,
        email: &str,
        price: PriceInput,
        ctx: Option<&RequestContext>,
    ) -> Result<String, IntakeError> {
        let desired_price = DesiredPrice::parse(price)?;
        let fields = product_fields(ctx);

        let record = self
            .repository
            .insert(NewPriceAlert {
                product_id: fields.product_id,
                product_title: fields.product_title,
                product_url: fields.product_url,
                email: email.to_string(),
                desired_price: desired_price.clone(),
            })
            .await?;

        info!(
            "Alerta registrada: id={} product_id={} desired_price={}",
            record.id, record.product_id, desired_price
        );

        let product_name = if record.product_title.is_empty() {
            record.product_id
        } else {
            record.product_title
        };

        Ok(format!(
            "¡Gracias! Hemos registrado tu alerta para «{}» a {} €. Te avisaremos cuando se alcance.",
            product_name, desired_price
        ))
    }
}
