//! The context field store: one collision-free slot per handle holding the
//! cumulative field collection visible at that point in the chain.
//!
//! The slot is a private wrapper type stored through the context's typed
//! association, so no other component can read or shadow it. Collections
//! are stored merged: a handle's slot always holds the full set visible to
//! it, and retrieval is a single copy, never a re-merge up the chain.

use std::sync::Arc;

use scopelog_context::Context;
use scopelog_fields::{merge, Field};

/// Private slot type: the merged field collection attached to a handle.
///
/// `Arc<[Field]>` so sibling handles that share an unchanged collection
/// share the allocation.
struct AttachedFields(Arc<[Field]>);

/// Attach fields to a handle, returning a child handle carrying the merge
/// of the handle's current fields with `fields`.
///
/// - Empty `fields` returns the same handle (a clone; `Context::ptr_eq`
///   holds, no new association is created).
/// - On key collision the new value wins; see [`merge`] for ordering.
/// - The input handle is unchanged: later attachments to either handle do
///   not affect the other.
///
/// # Examples
///
/// ```
/// use scopelog::{attach_fields, fields_of, Field};
/// use scopelog_context::Context;
///
/// let ctx = Context::root();
/// let ctx = attach_fields(&ctx, vec![Field::new("request_id", "abc123")]);
/// assert_eq!(fields_of(&ctx), vec![Field::new("request_id", "abc123")]);
/// ```
pub fn attach_fields(ctx: &Context, fields: Vec<Field>) -> Context {
    if fields.is_empty() {
        return ctx.clone();
    }

    let merged = match ctx.value::<AttachedFields>() {
        // First attachment on this path: store as-is, no merge needed.
        None => fields,
        Some(existing) => merge(existing.0.to_vec(), fields),
    };

    ctx.with_value(AttachedFields(merged.into()))
}

/// The field collection visible from `ctx`, as a defensive copy.
///
/// Returns an empty vec when no ancestor carries fields; that is the
/// normal "no fields in scope" case, not a fault. The returned vec is
/// independent of the store: mutating it affects no handle.
pub fn fields_of(ctx: &Context) -> Vec<Field> {
    match ctx.value::<AttachedFields>() {
        Some(attached) => attached.0.to_vec(),
        None => Vec::new(),
    }
}
