/// Outcome of comparing on-hand stock against a requested quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockDecision {
    Available,
    OutOfStock,
    Insufficient { available: u32, requested: u32 },
}

impl StockDecision {
    /// Zero stock is always reported as out of stock, even when nothing was requested.
    pub fn evaluate(available: u32, requested: u32) -> Self {
        if available == 0 {
            Self::OutOfStock
        } else if available < requested {
            Self::Insufficient {
                available,
                requested,
            }
        } else {
            Self::Available
        }
    }
}
