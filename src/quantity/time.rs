quantity!(Hours, suffix: "h", precision: 1);
quantity!(Years, suffix: "yr", precision: 1);

impl Hours {
    /// Scale a daily figure to a whole (non-leap) year.
    #[must_use]
    pub const fn per_year(self) -> Self {
        Self(self.0 * 365.0)
    }
}

impl Years {
    /// Sentinel payback period for an investment that never pays back.
    pub const NEVER: Self = Self(999.0);
}
