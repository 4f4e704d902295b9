//! Thunk actions, grouped by the module they are mounted in

pub mod counter {
    use crate::comms;
    use crate::thunk::{thunk, ThunkAction};
    use serde_json::json;
    use std::sync::Arc;

    /// Ask the backend to increment, then load the returned count into the
    /// store and onto the block's own label
    pub fn update_count() -> ThunkAction {
        Arc::new(|_args| {
            thunk(|ctx| async move {
                let result = comms::update_count(ctx.extra.client.as_ref(), &ctx.extra.make_url).await?;
                log::info!("Backend count is now {}", result.count);

                let load = ctx.action("counter.load")?;
                ctx.dispatcher.dispatch(load.call(&[json!(result.count)]));
                ctx.extra.xblock.update_count(&result);
                Ok(())
            })
        })
    }

}
