//! Chart series and their Plotly rendering
//!
//! [`ChartSeries`] is the renderer-neutral form (x labels, aligned y arrays,
//! y labels). [`PlotlyChart`] is the Plotly.js-native encoding of the same
//! data for the `--format plotly` output.

use serde::Serialize;

// ============================================================================
// Chart Series
// ============================================================================

/// Renderer-neutral chart data: one x axis, one or more aligned y arrays
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub title: String,
    pub x: Vec<String>,
    pub y: Vec<Vec<f64>>,
    pub labels: Vec<String>,
    pub colours: Vec<String>,
    /// Draw the y arrays stacked rather than overlaid
    pub stacked: bool,
}

impl ChartSeries {
    pub fn new(title: &str, x: Vec<String>) -> Self {
        Self {
            title: title.to_string(),
            x,
            y: Vec::new(),
            labels: Vec::new(),
            colours: Vec::new(),
            stacked: false,
        }
    }

    /// Add a y array; it must line up with the x labels
    pub fn with_series(mut self, label: &str, colour: &str, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), self.x.len());
        self.y.push(values);
        self.labels.push(label.to_string());
        self.colours.push(colour.to_string());
        self
    }

    pub fn stacked(mut self) -> Self {
        self.stacked = true;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Two-array charts put the second array on a secondary axis unless stacked
    pub fn to_plotly_chart(&self) -> PlotlyChart {
        let mut traces = Vec::with_capacity(self.y.len());
        for (i, values) in self.y.iter().enumerate() {
            let mut trace =
                PlotlyTrace::line(self.x.clone(), values.clone(), &self.labels[i], &self.colours[i]);
            if self.stacked {
                trace = if i == 0 {
                    trace.stacked_area().fill_to_zero()
                } else {
                    trace.stacked_area()
                };
            } else if i == 1 {
                trace = trace.on_secondary_axis();
            }
            traces.push(trace);
        }

        let y_title = self.labels.first().cloned().unwrap_or_default();
        let layout = if self.y.len() > 1 && !self.stacked {
            PlotlyLayout::dual_axis(&self.title, "", &y_title, &self.labels[1])
        } else {
            PlotlyLayout::basic(&self.title, "", &y_title)
        };

        PlotlyChart {
            data: traces,
            layout: layout.with_legend("h", 0.0, -0.2, "left"),
        }
    }
}

// ============================================================================
// Plotly Types
// ============================================================================

/// Complete Plotly chart data structure
///
/// Standard format expected by Plotly.js: `{data: [...], layout: {...}}`
#[derive(Debug, Clone, Serialize)]
pub struct PlotlyChart {
    pub data: Vec<PlotlyTrace>,
    pub layout: PlotlyLayout,
}

/// Plotly trace configuration
#[derive(Debug, Clone, Serialize)]
pub struct PlotlyTrace {
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub name: String,
    #[serde(rename = "type")]
    pub trace_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<PlotlyLine>,
    /// Stack group for stacked area charts (e.g., "one")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stackgroup: Option<String>,
    /// Fill mode for area charts (e.g., "tonexty", "tozeroy")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
}

/// Plotly line configuration
#[derive(Debug, Clone, Serialize)]
pub struct PlotlyLine {
    pub color: String,
}

/// Plotly legend configuration
#[derive(Debug, Clone, Serialize, Default)]
pub struct PlotlyLegend {
    /// Legend orientation: "v" (vertical) or "h" (horizontal)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xanchor: Option<String>,
}

/// Plotly layout configuration
#[derive(Debug, Clone, Serialize)]
pub struct PlotlyLayout {
    pub title: PlotlyTitle,
    pub xaxis: PlotlyAxis,
    pub yaxis: PlotlyAxis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis2: Option<PlotlySecondaryAxis>,
    pub hovermode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<PlotlyLegend>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlotlyTitle {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlotlyAxis {
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlotlySecondaryAxis {
    pub title: String,
    pub overlaying: String,
    pub side: String,
}

impl PlotlyLayout {
    /// Create a basic layout with single y-axis
    pub fn basic(title: &str, x_title: &str, y_title: &str) -> Self {
        Self {
            title: PlotlyTitle {
                text: title.to_string(),
            },
            xaxis: PlotlyAxis {
                title: x_title.to_string(),
            },
            yaxis: PlotlyAxis {
                title: y_title.to_string(),
            },
            yaxis2: None,
            hovermode: "x unified".to_string(),
            legend: None,
        }
    }

    /// Create a layout with dual y-axes
    pub fn dual_axis(title: &str, x_title: &str, y1_title: &str, y2_title: &str) -> Self {
        let mut layout = Self::basic(title, x_title, y1_title);
        layout.yaxis2 = Some(PlotlySecondaryAxis {
            title: y2_title.to_string(),
            overlaying: "y".to_string(),
            side: "right".to_string(),
        });
        layout
    }

    pub fn with_legend(mut self, orientation: &str, x: f64, y: f64, xanchor: &str) -> Self {
        self.legend = Some(PlotlyLegend {
            orientation: Some(orientation.to_string()),
            x: Some(x),
            y: Some(y),
            xanchor: Some(xanchor.to_string()),
        });
        self
    }
}

impl PlotlyTrace {
    /// Create a line trace
    pub fn line(x: Vec<String>, y: Vec<f64>, name: &str, color: &str) -> Self {
        Self {
            x,
            y,
            name: name.to_string(),
            trace_type: "scatter".to_string(),
            mode: Some("lines".to_string()),
            yaxis: None,
            line: Some(PlotlyLine {
                color: color.to_string(),
            }),
            stackgroup: None,
            fill: None,
        }
    }

    /// Set this trace to use the secondary y-axis
    pub fn on_secondary_axis(mut self) -> Self {
        self.yaxis = Some("y2".to_string());
        self
    }

    /// Sets stackgroup to "one" and fill to "tonexty" for Plotly stacked areas
    pub fn stacked_area(mut self) -> Self {
        self.stackgroup = Some("one".to_string());
        self.fill = Some("tonexty".to_string());
        self
    }

    /// Set fill to start from zero (for first trace in stacked area)
    pub fn fill_to_zero(mut self) -> Self {
        self.fill = Some("tozeroy".to_string());
        self
    }
}
