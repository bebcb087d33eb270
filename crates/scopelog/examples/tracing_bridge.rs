//! Forwarding context-scoped records into the `tracing` ecosystem.
//!
//! [`TracingSink`] carries the merged fields as one pre-encoded JSON value,
//! so any installed subscriber sees them without knowing about scopelog.

use std::sync::Arc;

use scopelog::{attach_fields, Field, Logger, TracingSink};
use scopelog_context::Context;

fn main() {
    tracing_subscriber::fmt().init();

    let logger = Logger::new(Arc::new(TracingSink::new()));

    let ctx = attach_fields(
        &Context::root(),
        vec![
            Field::new("request_id", "req-1138"),
            Field::new("user_id", "user-42"),
        ],
    );

    logger.info(&ctx, "request accepted", vec![]);
    logger.warn(&ctx, "retrying upstream call", vec![Field::new("attempt", 2)]);
    logger.error(&ctx, "upstream gave up", vec![Field::new("status", 502)]);
}
