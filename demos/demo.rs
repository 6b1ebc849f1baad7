use propstack::{register_resource, ConfigBuilder};

fn main() -> Result<(), propstack::ConfigError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Bundled defaults, overridden by an optional file passed as argv[1].
    register_resource("defaults.properties", include_str!("defaults.properties"));

    let config = ConfigBuilder::default_from_resource(Some("defaults.properties"))
        .override_from_file(std::env::args().nth(1))
        .load()?;

    println!("app.name  = {}", config.key("app.name").as_str_or("unnamed"));
    println!("app.port  = {}", config.key("app.port").as_i64_or(8080)?);
    println!("app.debug = {}", config.key("app.debug").is_true_or(false));

    let name = config.key("app.name");
    println!("app.name loaded from {}", name.loaded_from().description());

    println!("sources: {}", config);

    Ok(())
}
