//! Bind a service configuration from the process environment.
//!
//! Run with:
//! ```bash
//! APP_HOST=0.0.0.0 APP_PORT=9090 cargo run --example service_config
//! ```

use sourcebind::prelude::*;

#[derive(Debug, Default)]
struct ServiceConfig {
    host: String,
    port: u16,
    max_retries: u8,
    debug: bool,
}

fn service_schema() -> Schema<ServiceConfig> {
    Schema::builder()
        .with_field(
            Field::string("host", |c: &mut ServiceConfig, v| c.host = v)
                .with_tag(EnvSource::ID, "APP_HOST")
                .with_default("127.0.0.1"),
        )
        .with_field(
            Field::u16("port", |c: &mut ServiceConfig, v| c.port = v)
                .with_tag(EnvSource::ID, "APP_PORT")
                .with_default("8080"),
        )
        .with_field(
            Field::u8("max_retries", |c: &mut ServiceConfig, v| c.max_retries = v)
                .with_tag(EnvSource::ID, "APP_MAX_RETRIES")
                .with_default("3"),
        )
        .with_field(
            Field::boolean("debug", |c: &mut ServiceConfig, v| c.debug = v)
                .with_tag(EnvSource::ID, "APP_DEBUG")
                .with_default("false"),
        )
        .build()
}

fn main() -> Result<()> {
    let loader = Loader::builder().with_source(EnvSource::new()).build();

    let mut config = ServiceConfig::default();
    loader.load(&mut config, &service_schema())?;

    println!("resolved configuration: {config:#?}");
    println!("would listen on {}:{}", config.host, config.port);
    Ok(())
}
