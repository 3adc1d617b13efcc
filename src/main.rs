//
//  atlassian-client
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use opentelemetry::global;
use opentelemetry_otlp::{SpanExporter, WithExportConfig};
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::trace::SdkTracerProvider;
use opentelemetry_sdk::Resource;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use atlassian_client::api::{CallContext, Telemetry};
use atlassian_client::cli::{Cli, Commands};
use atlassian_client::config::{Config, TelemetryConfig};
use atlassian_client::exit_codes;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = Config::load()?;
    let stdout = cli.command.exports_spans_to_stdout(&config.telemetry);
    let provider = init_tracer_provider(&config.telemetry, stdout)?;

    let result = run(cli, &config).await;

    if let Err(e) = provider.shutdown() {
        tracing::warn!("Failed to flush spans: {e}");
    }

    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_codes::from_error(&e));
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("ATL_LOG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

/// Registers the global tracer provider and W3C trace context propagator.
/// Spans are exported over OTLP when an endpoint is configured, and printed
/// to stdout when `stdout` is set.
fn init_tracer_provider(config: &TelemetryConfig, stdout: bool) -> Result<SdkTracerProvider> {
    let resource = Resource::builder()
        .with_service_name(config.service_name.clone())
        .build();
    let mut builder = SdkTracerProvider::builder().with_resource(resource);

    if let Some(endpoint) = &config.otlp_endpoint {
        let exporter = SpanExporter::builder()
            .with_tonic()
            .with_endpoint(endpoint.clone())
            .build()?;
        builder = builder.with_batch_exporter(exporter);
        tracing::debug!("Exporting spans to {endpoint}");
    }
    if stdout {
        builder = builder.with_simple_exporter(opentelemetry_stdout::SpanExporter::default());
    }

    let provider = builder.build();
    global::set_tracer_provider(provider.clone());
    global::set_text_map_propagator(TraceContextPropagator::new());
    Ok(provider)
}

async fn run(cli: Cli, config: &Config) -> Result<()> {
    let cancellation = CancellationToken::new();
    let token = cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            token.cancel();
        }
    });

    let ctx = CallContext::current().with_cancellation(cancellation);
    let telemetry = Telemetry::global();

    match cli.command {
        Commands::TraceDemo(cmd) => cmd.run(&ctx, &telemetry).await,
        Commands::Activity(cmd) => cmd.run(&cli.global, config, &ctx, &telemetry).await,
        Commands::Comments(cmd) => cmd.run(&cli.global, config, &ctx, &telemetry).await,
        Commands::Search(cmd) => cmd.run(&cli.global, config, &ctx, &telemetry).await,
        Commands::Object(cmd) => cmd.run(&cli.global, config, &ctx, &telemetry).await,
        Commands::Repos(cmd) => cmd.run(&cli.global, config, &ctx, &telemetry).await,
        Commands::Config(cmd) => cmd.run().await,
        Commands::Version => {
            println!("atl version {}", atlassian_client::VERSION);
            Ok(())
        }
    }
}
