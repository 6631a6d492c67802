use hypertext::prelude::*;

/// An error message, small enough to sit in a table cell in place of the
/// row's buttons.
pub struct ErrorAlert<S> {
    pub msg: S,
}

impl<S: ToString> Renderable for ErrorAlert<S> {
    fn render_to(
        &self,
        buffer: &mut hypertext::Buffer<hypertext::context::Node>,
    ) {
        maud!({
            div class="alert alert-danger mb-0 py-1 small" role="alert" {
                (self.msg.to_string())
            }
        })
        .render_to(buffer);
    }
}
