//! Per-panel view configuration.

/// Tuning knobs for one tree view instance.
///
/// # Example
///
/// ```
/// use regtree_engine::ViewConfig;
///
/// let config = ViewConfig::default()
///     .with_virtualization_threshold(200)
///     .with_overscan(10);
/// assert_eq!(config.virtualization_threshold, 200);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ViewConfig {
    /// Visible row count above which rendering switches to the virtual
    /// window.
    pub virtualization_threshold: usize,
    /// Fixed row height in pixels; window geometry assumes every row has it.
    pub row_height: u32,
    /// Extra rows rendered above and below the viewport.
    pub overscan: usize,
    /// Minimum row delta before a scroll recomputes the rendered window.
    pub rewindow_slack: usize,
    /// Horizontal indentation per tree depth level, in pixels.
    pub indent_unit: u32,
    /// Assemblies whose label starts with this prefix are vendor assemblies.
    pub vendor_prefix: String,
    /// Vendor assembly labels that stay visible despite the prefix match.
    ///
    /// `Microsoft.Crm.ServiceBus` is the service-bus integration assembly
    /// users register their own endpoint steps on, so hiding it would hide
    /// user registrations with it.
    pub vendor_allow_list: Vec<String>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            virtualization_threshold: 500,
            row_height: 30,
            overscan: 20,
            rewindow_slack: 5,
            indent_unit: 16,
            vendor_prefix: "Microsoft.".to_string(),
            vendor_allow_list: vec!["Microsoft.Crm.ServiceBus".to_string()],
        }
    }
}

impl ViewConfig {
    #[must_use]
    pub fn with_virtualization_threshold(mut self, rows: usize) -> Self {
        self.virtualization_threshold = rows;
        self
    }

    #[must_use]
    pub fn with_row_height(mut self, px: u32) -> Self {
        self.row_height = px.max(1);
        self
    }

    #[must_use]
    pub fn with_overscan(mut self, rows: usize) -> Self {
        self.overscan = rows;
        self
    }

    #[must_use]
    pub fn with_rewindow_slack(mut self, rows: usize) -> Self {
        self.rewindow_slack = rows;
        self
    }

    #[must_use]
    pub fn with_indent_unit(mut self, px: u32) -> Self {
        self.indent_unit = px;
        self
    }

    #[must_use]
    pub fn with_vendor_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.vendor_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_vendor_allow_list(mut self, labels: Vec<String>) -> Self {
        self.vendor_allow_list = labels;
        self
    }
}
