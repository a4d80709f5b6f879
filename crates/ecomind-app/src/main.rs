use ecomind_app::config::AppConfig;
use ecomind_app::error::AppError;
use ecomind_app::lifecycle::EcoMindSystem;
use ecomind_app::view;
use resource_controller::tracing::setup_tracing;
use tracing::{info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AppError> {
    setup_tracing();

    let config = AppConfig::load()?;
    info!(base_url = %config.base_url, data_endpoint = %config.data_endpoint, "Starting EcoMindShift");
    let system = EcoMindSystem::new(&config)?;

    println!("{}\n", view::landing_page());

    // Both pages load concurrently; each controller runs its own request.
    let spec = system.business_spec.load();
    let data = system.data_list.load();
    spec.settled().await?;
    data.settled().await?;

    println!("{}\n", system.business_spec.render());
    println!("{}\n", system.data_list.render());

    system.testimonials.edit(|form| {
        form.name = "Demo User".into();
        form.email = "demo@ecomindshift.example".into();
        form.message = "EcoMindShift helped us cut our footprint.".into();
    });
    system.testimonials.submit().settled().await?;
    if system.testimonials.state().is_failure() {
        warn!("Testimonial was not accepted");
    }
    println!("{}", system.testimonials.render());

    Ok(())
}
