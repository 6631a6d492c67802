//! A bare admin table which hosts an [`ActionColumn`].

use hypertext::prelude::*;

use crate::{
    context::{RowContext, RowKey, RowModel},
    widgets::{
        actions::{ActionColumn, ButtonGroup},
        alert::ErrorAlert,
    },
};

pub struct DataColumn<M> {
    pub header: String,
    pub value: Box<dyn Fn(&M) -> String + Send + Sync>,
}

impl<M> DataColumn<M> {
    pub fn new(
        header: &str,
        value: impl Fn(&M) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            header: header.to_string(),
            value: Box::new(value),
        }
    }
}

pub struct GridRow<M> {
    pub key: RowKey,
    pub model: M,
}

pub struct Grid<'r, M: RowModel> {
    pub rows: &'r [GridRow<M>],
    pub columns: &'r [DataColumn<M>],
    pub actions: &'r ActionColumn,
}

impl<'r, M: RowModel> Renderable for Grid<'r, M> {
    fn render_to(
        &self,
        buffer: &mut hypertext::Buffer<hypertext::context::Node>,
    ) {
        // A row whose buttons fail to render gets an alert in place of the
        // button group, never a half-built link.
        let rendered = self
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let ctx = RowContext::new(&row.model, row.key.clone(), index);
                match self.actions.render_row(&ctx) {
                    Ok(buttons) => (Some(buttons), None),
                    Err(e) => {
                        tracing::warn!(row = index, "Could not render actions: {e}");
                        (None, Some(e.to_string()))
                    }
                }
            })
            .collect::<Vec<_>>();

        let width = (self.columns.len() + 1).to_string();

        maud! {
            div class="table-responsive" {
                table class="table table-striped table-sm" {
                    thead {
                        tr {
                            @for column in self.columns {
                                th scope="col" { (column.header) }
                            }
                            th scope="col" {}
                        }
                    }
                    tbody {
                        @for (row, (buttons, error)) in self.rows.iter().zip(&rendered) {
                            tr {
                                @for column in self.columns {
                                    td { ((column.value)(&row.model)) }
                                }
                                td class="text-end" {
                                    @if let Some(buttons) = buttons {
                                        (ButtonGroup { buttons })
                                    }
                                    @if let Some(error) = error {
                                        (ErrorAlert { msg: error })
                                    }
                                }
                            }
                        }
                        @if self.rows.is_empty() {
                            tr {
                                td colspan=(width) class="text-center" { "No results found." }
                            }
                        }
                    }
                }
            }
        }
        .render_to(buffer);
    }
}
