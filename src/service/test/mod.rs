//! Game service tests, one file per operation.

mod click;

use engine::RenderRequest;

use crate::service::game::GameReply;

/// Unwraps a render, failing the test on a notice.
fn expect_render(reply: GameReply) -> RenderRequest {
    match reply {
        GameReply::Render(render) => render,
        GameReply::Notice(message) => panic!("expected a render, got notice '{}'", message),
    }
}

/// Unwraps a notice, failing the test on a render.
fn expect_notice(reply: GameReply) -> String {
    match reply {
        GameReply::Notice(message) => message,
        GameReply::Render(render) => panic!("expected a notice, got render {:?}", render.prompt),
    }
}
