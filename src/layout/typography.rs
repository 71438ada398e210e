//! Chart font sizing by label density.

/// Density tier of a category axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelDensity {
    Standard,
    Subordinate,
    Minimum,
}

impl LabelDensity {
    /// Classify category labels.
    ///
    /// The score is the category count plus a third of the mean label length,
    /// so a few long labels crowd the axis as much as many short ones.
    pub fn of<S: AsRef<str>>(categories: &[S]) -> Self {
        let score = density_score(categories);
        if score <= 6.0 {
            LabelDensity::Standard
        } else if score <= 10.0 {
            LabelDensity::Subordinate
        } else {
            LabelDensity::Minimum
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LabelDensity::Standard => "standard",
            LabelDensity::Subordinate => "subordinate",
            LabelDensity::Minimum => "minimum",
        }
    }
}

pub fn density_score<S: AsRef<str>>(categories: &[S]) -> f64 {
    let count = categories.len();
    if count == 0 {
        return 0.0;
    }
    let total_chars: usize = categories.iter().map(|c| c.as_ref().chars().count()).sum();
    count as f64 + (total_chars as f64 / count as f64) / 3.0
}

/// Font sizes in points for the text elements of a chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartTypography {
    pub axis_labels: f64,
    pub legend: f64,
    pub data_labels: f64,
    pub density: LabelDensity,
}

impl ChartTypography {
    pub fn for_categories<S: AsRef<str>>(categories: &[S]) -> Self {
        let density = LabelDensity::of(categories);
        let size = match density {
            LabelDensity::Standard => 9.0,
            LabelDensity::Subordinate => 8.0,
            LabelDensity::Minimum => 7.0,
        };
        Self {
            axis_labels: size,
            legend: size,
            data_labels: size,
            density,
        }
    }
}
