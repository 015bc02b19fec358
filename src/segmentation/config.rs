/// A monotonic step function: a value scores `scores[i]` for the first
/// `breaks[i]` it does not exceed, and `top` beyond the last break.
#[derive(Debug, Clone)]
pub struct StepRubric<const N: usize> {
    pub breaks: [i64; N],
    pub scores: [u32; N],
    pub top: u32,
}

impl<const N: usize> StepRubric<N> {
    pub fn score(&self, value: i64) -> u32 {
        for (bound, score) in self.breaks.iter().zip(self.scores.iter()) {
            if value <= *bound {
                return *score;
            }
        }
        self.top
    }
}

/// Scoring rubrics and classification thresholds for the segmentation
/// engine. The defaults are the production rubric; tests parameterize them.
#[derive(Debug, Clone)]
pub struct SegmentationConfig {
    /// Engagement count per customer.
    pub frequency: StepRubric<4>,
    /// Summed session duration in seconds.
    pub total_duration: StepRubric<4>,
    /// A subscription at exactly the base price scores the floor of 1;
    /// everything else runs through the monetary rubric.
    pub monetary_base_price: i64,
    /// Subscription price, for plans above the base price.
    pub monetary: StepRubric<2>,
    /// Liked engagement count.
    pub liked: StepRubric<4>,
    /// Disliked engagement count. Inverted: more dislikes scores lower.
    pub disliked: StepRubric<3>,

    /// Upper total-score bounds (inclusive) for segments 1 to 3; anything
    /// above the last bound is segment 4.
    pub segment_bounds: [u32; 3],

    /// Recency assigned to customers with no engagement history at all.
    pub never_engaged_recency_days: i64,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            frequency: StepRubric {
                breaks: [1, 4, 7, 10],
                scores: [1, 3, 5, 8],
                top: 10,
            },
            total_duration: StepRubric {
                breaks: [199, 600, 900, 1500],
                scores: [1, 3, 5, 8],
                top: 10,
            },
            monetary_base_price: 5,
            monetary: StepRubric {
                breaks: [7, 9],
                scores: [3, 7],
                top: 10,
            },
            liked: StepRubric {
                breaks: [0, 1, 3, 5],
                scores: [1, 3, 5, 8],
                top: 10,
            },
            disliked: StepRubric {
                breaks: [0, 2, 4],
                scores: [10, 7, 5],
                top: 2,
            },
            segment_bounds: [15, 25, 30],
            never_engaged_recency_days: 9999,
        }
    }
}
