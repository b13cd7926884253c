//! Cover creation from configuration and descriptor

use tracing::{error, info};

use crate::{
    config::CoverConfig,
    control::CoverController,
    error::SetupError,
    services::{get_controller, DescriptorLoader},
    tasks::EventSender,
};

/// Build a cover, or log why it cannot exist and return `None`
pub async fn setup_cover(
    config: &CoverConfig,
    loader: &dyn DescriptorLoader,
    events: EventSender,
) -> Option<CoverController> {
    match try_setup_cover(config, loader, events).await {
        Ok(controller) => Some(controller),
        Err(e) => {
            error!("Cover {} (device code {}) not created: {}", config.name, config.device_code, e);
            None
        }
    }
}

/// Build a cover, reporting why setup failed
pub async fn try_setup_cover(
    config: &CoverConfig,
    loader: &dyn DescriptorLoader,
    events: EventSender,
) -> Result<CoverController, SetupError> {
    let descriptor = loader.load(config.device_code).await?;
    let transmitter = get_controller(
        &descriptor.supported_controller,
        &descriptor.commands_encoding,
        &config.controller_data,
        config.emit_timeout,
    )?;

    info!(
        "Set up {} ({} {:?}) via {} with {} commands",
        config.name,
        descriptor.manufacturer,
        descriptor.supported_models,
        descriptor.supported_controller,
        descriptor.commands_encoding
    );

    Ok(CoverController::new(
        config.clone(),
        descriptor,
        Box::new(transmitter),
        events,
    ))
}
