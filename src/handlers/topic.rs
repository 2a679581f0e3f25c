//! TOPIC handler and topic reconciliation.

use super::{Context, Handler, HandlerResult};
use tracing::debug;

/// Handler for the `/topic [text]` command.
///
/// Without arguments the current topic is shown; anything else goes through
/// [`fix_topic`].
pub struct TopicHandler;

impl Handler for TopicHandler {
    fn handle(&self, ctx: &Context<'_>, args: &str) -> HandlerResult {
        if !args.is_empty() {
            return fix_topic(ctx, args);
        }

        match ctx.directory.topic().filter(|t| !t.is_removal()) {
            Some(topic) => ctx.system_message(topic.describe()),
            None => ctx.system_message("No topic set"),
        }
        Ok(())
    }
}

/// Make `raw` the topic unless it already is, ignoring surrounding whitespace.
///
/// A blank `raw` removes the topic. The display is only refreshed after the
/// session accepted the change.
pub fn fix_topic(ctx: &Context<'_>, raw: &str) -> HandlerResult {
    let text = raw.trim();
    let current = ctx.directory.topic().map(|t| t.text).unwrap_or_default();

    if text == current.trim() {
        debug!("Topic unchanged");
        return Ok(());
    }

    ctx.session.change_topic(text)?;

    if text.is_empty() {
        ctx.system_message("You removed the topic");
    } else {
        ctx.system_message(format!("You changed the topic to: {text}"));
    }
    ctx.view.show_topic();
    Ok(())
}
