//! Walkthrough of context-scoped logging: basic accumulation, an HTTP-style
//! middleware boundary, and service layers sharing one handle.
//!
//! Run with `cargo run --example basic`; records come out as JSON lines.

use std::sync::Arc;

use scopelog::{attach_fields, Field, Logger, WriteSink};
use scopelog_context::Context;

fn main() {
    let sink = Arc::new(WriteSink::new(std::io::stdout()));
    let logger = Logger::new(sink).with(vec![Field::new("service", "example")]);

    basic(&logger);
    middleware(&logger);
    layers(&logger);
}

fn basic(logger: &Logger) {
    let ctx = attach_fields(
        &Context::root(),
        vec![
            Field::new("request_id", "abc123"),
            Field::new("user_id", "user456"),
        ],
    );

    // Context fields are included automatically.
    logger.info(&ctx, "processing user request", vec![Field::new("action", "update_profile")]);

    let ctx = attach_fields(
        &ctx,
        vec![
            Field::new("session_id", "session789"),
            Field::new("authenticated", true),
        ],
    );
    logger.info(&ctx, "user profile updated successfully", vec![]);

    // Overriding an existing key replaces the value.
    let ctx = attach_fields(&ctx, vec![Field::new("request_id", "override")]);
    logger.info(&ctx, "request id overridden", vec![]);
}

/// What an HTTP middleware would do: attach request identity at the edge,
/// then hand the derived handle to the handler.
fn middleware(logger: &Logger) {
    let ctx = attach_fields(
        &Context::root(),
        vec![
            Field::new("request_id", "req-7f3a"),
            Field::new("method", "POST"),
            Field::new("path", "/api/orders"),
        ],
    );
    handle_request(logger, &ctx);
}

fn handle_request(logger: &Logger, ctx: &Context) {
    logger.info(ctx, "request received", vec![]);
    logger.info(ctx, "request completed", vec![Field::new("status", 200)]);
}

/// Service layers: each layer adds its own fields without touching the
/// caller's handle.
fn layers(logger: &Logger) {
    let ctx = attach_fields(&Context::root(), vec![Field::new("request_id", "req-9b21")]);

    // Auth layer.
    let ctx = attach_fields(&ctx, vec![Field::new("user_id", "user-42")]);
    logger.info(&ctx, "user authenticated", vec![]);

    // Storage layer.
    let ctx = attach_fields(&ctx, vec![Field::new("table", "orders")]);
    logger.info(&ctx, "row inserted", vec![Field::new("elapsed_ms", 12)]);
}
