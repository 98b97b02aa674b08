//! Per-page table configuration read from the items container's markup

/// Which columns a static table shows, and in which order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// name, price
    Np,
    /// name, quantity, price
    Nqp,
    /// name, price, quantity
    #[default]
    Npq,
}

impl Layout {
    /// Parse a `data-cart-layout` value; absent or unknown values mean `Npq`.
    pub fn from_attr(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("np") => Layout::Np,
            Some("nqp") => Layout::Nqp,
            _ => Layout::Npq,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::Np => "np",
            Layout::Nqp => "nqp",
            Layout::Npq => "npq",
        }
    }
}

/// Whether the table is read-only or carries quantity controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Static,
    Editable,
}

impl Mode {
    /// Parse a `data-cart-mode` value; anything but `editable` is static.
    pub fn from_attr(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("editable") => Mode::Editable,
            _ => Mode::Static,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Static => "static",
            Mode::Editable => "editable",
        }
    }
}

/// Layout and mode of one page's cart table, fixed for the page's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderContext {
    pub layout: Layout,
    pub mode: Mode,
}

impl RenderContext {
    pub fn new(layout: Layout, mode: Mode) -> Self {
        Self { layout, mode }
    }

    pub fn from_attrs(layout: Option<&str>, mode: Option<&str>) -> Self {
        Self {
            layout: Layout::from_attr(layout),
            mode: Mode::from_attr(mode),
        }
    }

    /// Number of columns every row spans. Editable tables always have three.
    pub fn column_count(&self) -> usize {
        match (self.mode, self.layout) {
            (Mode::Editable, _) => 3,
            (Mode::Static, Layout::Np) => 2,
            (Mode::Static, _) => 3,
        }
    }

    pub fn is_editable(&self) -> bool {
        self.mode == Mode::Editable
    }
}
