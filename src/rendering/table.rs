//! Cart table renderer.
//!
//! Every render reloads the cart and replaces the whole row set; there is no
//! incremental diffing. Carts are small and a full replace keeps re-rendering
//! idempotent.

use sha2::{Digest, Sha256};

use super::context::{Layout, Mode, RenderContext};
use super::events::{CartAction, UiEvent};
use super::format::CurrencyFormat;
use crate::cart::CartLine;
use crate::pricing::cart_total;
use crate::quantity::{clamp_qty, MAX_QTY, MIN_QTY};
use crate::storage::Storage;
use crate::store::CartStore;
use crate::{CartConfig, CartMessages};

/// One table cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Plain text; `nowrap` cells hold prices and quantities
    Text { text: String, nowrap: bool },
    /// Decrement / input / increment group plus the remove action
    QtyControl { id: String, qty: u32 },
}

impl Cell {
    fn text(text: impl Into<String>) -> Self {
        Cell::Text { text: text.into(), nowrap: false }
    }

    fn nowrap(text: impl Into<String>) -> Self {
        Cell::Text { text: text.into(), nowrap: true }
    }

    /// Display text; quantity controls show their input value.
    pub fn display(&self) -> String {
        match self {
            Cell::Text { text, .. } => text.clone(),
            Cell::QtyControl { qty, .. } => qty.to_string(),
        }
    }

    pub fn is_interactive(&self) -> bool {
        matches!(self, Cell::QtyControl { .. })
    }
}

/// One table row
#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    /// Informational row shown for an empty cart, spanning every column
    Empty { colspan: usize, message: String },
    /// A cart line
    Line { id: String, cells: Vec<Cell> },
}

impl Row {
    pub fn cells(&self) -> &[Cell] {
        match self {
            Row::Empty { .. } => &[],
            Row::Line { cells, .. } => cells,
        }
    }
}

/// A rendered table: rows, their markup and the formatted total
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableView {
    pub rows: Vec<Row>,
    pub total: String,
    markup: String,
}

impl TableView {
    /// Inner markup of the items container (`<tr>` elements only)
    pub fn rows_html(&self) -> &str {
        &self.markup
    }

    pub fn is_empty_state(&self) -> bool {
        matches!(self.rows.as_slice(), [Row::Empty { .. }])
    }

    /// SHA-256 (hex) over the row markup and total; equal views share a fingerprint.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.markup.as_bytes());
        hasher.update(b"\n");
        hasher.update(self.total.as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// Renders a store's cart into one page's table and handles its controls
pub struct CartTable {
    ctx: RenderContext,
    currency: CurrencyFormat,
    messages: CartMessages,
    view: TableView,
}

impl CartTable {
    pub fn new(ctx: RenderContext, config: &CartConfig) -> Self {
        Self {
            ctx,
            currency: config.currency.clone(),
            messages: config.messages.clone(),
            view: TableView::default(),
        }
    }

    pub fn context(&self) -> RenderContext {
        self.ctx
    }

    /// The most recently rendered view
    pub fn view(&self) -> &TableView {
        &self.view
    }

    /// Reload the cart from `store` and replace the rendered rows.
    pub fn render<S: Storage>(&mut self, store: &CartStore<S>) -> &TableView {
        let next = self.render_cart(&store.get_cart());
        if next == self.view {
            log::debug!("cart table: render unchanged ({} rows)", next.rows.len());
        } else {
            log::debug!(
                "cart table: rendered {} rows, total {} [{}]",
                next.rows.len(),
                next.total,
                &next.fingerprint()[..12]
            );
        }
        self.view = next;
        &self.view
    }

    /// Build the view for `cart` without touching storage.
    pub fn render_cart(&self, cart: &[CartLine]) -> TableView {
        if cart.is_empty() {
            let row = Row::Empty {
                colspan: self.ctx.column_count(),
                message: self.messages.empty_cart.clone(),
            };
            let markup = self.row_html(&row);
            return TableView {
                rows: vec![row],
                total: self.currency.format(0.0),
                markup,
            };
        }

        let rows: Vec<Row> = cart.iter().map(|line| self.line_row(line)).collect();
        let markup = rows.iter().map(|r| self.row_html(r)).collect::<String>();
        TableView {
            rows,
            total: self.currency.format(cart_total(cart)),
            markup,
        }
    }

    /// Delegated handler for events bubbling up to the items container.
    ///
    /// Returns whether the event was handled, which re-renders the table
    /// even when the cart itself is unchanged (a control for an id no
    /// longer in the cart). Static tables ignore every event.
    pub fn handle_event<S: Storage>(&mut self, store: &mut CartStore<S>, event: &UiEvent) -> bool {
        match CartAction::from_event(event) {
            Some(action) if action.is_table_action() => self.apply(store, &action),
            _ => false,
        }
    }

    /// Apply a decoded table action and re-render.
    pub fn apply<S: Storage>(&mut self, store: &mut CartStore<S>, action: &CartAction) -> bool {
        if !self.ctx.is_editable() {
            return false;
        }
        match action {
            CartAction::Increment { id } => {
                let base = current_qty(store, id);
                store.set_qty(id, &(base + 1.0));
            }
            CartAction::Decrement { id } => {
                let base = current_qty(store, id);
                store.set_qty(id, &(base - 1.0));
            }
            CartAction::Remove { id } => store.remove_item(id),
            CartAction::SetQty { id, value } => store.set_qty(id, value.as_str()),
            CartAction::AddToCart(_) => return false,
        }
        self.render(store);
        true
    }

    fn line_row(&self, line: &CartLine) -> Row {
        let name = Cell::text(line.name.clone());
        let price = Cell::nowrap(self.currency.format(line.price));
        let cells = match (self.ctx.mode, self.ctx.layout) {
            (Mode::Editable, _) => vec![
                name,
                price,
                Cell::QtyControl {
                    id: line.id.clone(),
                    qty: clamp_qty(&line.qty),
                },
            ],
            (Mode::Static, Layout::Nqp) => {
                vec![name, Cell::nowrap(format!("{}×", line.qty)), price]
            }
            (Mode::Static, Layout::Np) => vec![name, price],
            (Mode::Static, Layout::Npq) => {
                vec![name, price, Cell::nowrap(format!("× {}", line.qty))]
            }
        };
        Row::Line {
            id: line.id.clone(),
            cells,
        }
    }

    fn row_html(&self, row: &Row) -> String {
        match row {
            Row::Empty { colspan, message } => format!(
                "<tr><td colspan=\"{}\" class=\"small\">{}</td></tr>",
                colspan,
                escape_html(message)
            ),
            Row::Line { cells, .. } => {
                let mut out = String::from("<tr>");
                for cell in cells {
                    out.push_str(&self.cell_html(cell));
                }
                out.push_str("</tr>");
                out
            }
        }
    }

    fn cell_html(&self, cell: &Cell) -> String {
        match cell {
            Cell::Text { text, nowrap: false } => format!("<td>{}</td>", escape_html(text)),
            Cell::Text { text, nowrap: true } => {
                format!("<td class=\"nowrap\">{}</td>", escape_html(text))
            }
            Cell::QtyControl { id, qty } => {
                let id = escape_html(id);
                let m = &self.messages;
                format!(
                    concat!(
                        "<td class=\"nowrap\">",
                        "<div class=\"qty\" role=\"group\" aria-label=\"{group}\">",
                        "<button type=\"button\" class=\"qty-btn\" data-qty-dec data-id=\"{id}\" aria-label=\"{dec}\">−</button>",
                        "<input class=\"qty-input\" type=\"number\" min=\"{min}\" max=\"{max}\" inputmode=\"numeric\" value=\"{qty}\" data-qty-input data-id=\"{id}\" aria-label=\"{input}\">",
                        "<button type=\"button\" class=\"qty-btn\" data-qty-inc data-id=\"{id}\" aria-label=\"{inc}\">+</button>",
                        "</div>",
                        "<button type=\"button\" class=\"link-danger\" data-remove data-id=\"{id}\">{remove}</button>",
                        "</td>"
                    ),
                    group = escape_html(&m.qty_group_label),
                    id = id,
                    dec = escape_html(&m.decrease_label),
                    min = MIN_QTY,
                    max = MAX_QTY,
                    qty = qty,
                    input = escape_html(&m.qty_input_label),
                    inc = escape_html(&m.increase_label),
                    remove = escape_html(&m.remove_label),
                )
            }
        }
    }
}

/// The line's quantity as the step base: a vanished line or a zero quantity counts as 1.
fn current_qty<S: Storage>(store: &CartStore<S>, id: &str) -> f64 {
    store
        .get_cart()
        .iter()
        .find(|line| line.id == id)
        .map(|line| line.qty)
        .filter(|qty| *qty > 0)
        .map_or(1.0, f64::from)
}

pub(crate) fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
