//! Layout renderer.

use storehive_core::Block;

use super::context::RenderContext;
use super::registry;
use super::sections::Section;

/// Lazily render a layout, one section per registered block, in block order.
///
/// Blocks without a renderer are skipped with a warning.
pub fn sections<'a>(
    layout: &'a [Block],
    ctx: &'a RenderContext<'_>,
) -> impl Iterator<Item = Section> {
    layout.iter().filter_map(move |block| {
        let Some(render_fn) = registry::resolve(&block.kind) else {
            tracing::warn!(
                store = %ctx.store.slug,
                block_id = %block.id,
                block_type = block.type_name(),
                "skipping block with no renderer"
            );
            return None;
        };
        Some(render_fn(block, ctx))
    })
}

/// Render a layout into its sections.
#[must_use]
pub fn render(layout: &[Block], ctx: &RenderContext<'_>) -> Vec<Section> {
    sections(layout, ctx).collect()
}

/// Render a layout straight to HTML fragments.
///
/// A section whose template fails is logged and left out; the page still
/// renders.
#[must_use]
pub fn render_html(layout: &[Block], ctx: &RenderContext<'_>) -> Vec<String> {
    sections(layout, ctx)
        .filter_map(|section| match section.to_html() {
            Ok(html) => Some(html),
            Err(e) => {
                tracing::error!(
                    block_id = section.block_id(),
                    block_type = section.kind(),
                    error = %e,
                    "section template failed"
                );
                None
            }
        })
        .collect()
}
