//! Fundraising milestone rewards.

/// A fundraising threshold unlocking a described reward, independent of
/// every other milestone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Milestone {
    /// Donation total required to achieve the reward.
    pub threshold: f64,
    pub reward: &'static str,
    pub detail: &'static str,
    /// Donation total at which the reward *label* gets its achieved
    /// styling. The original dashboard compared each label against the
    /// previous tier's threshold, so this lags `threshold` by one tier.
    /// Long-standing behavior; do not line the two up without confirming
    /// intent.
    pub label_threshold: f64,
}

pub const MILESTONES: [Milestone; 4] = [
    Milestone {
        threshold: 2_500.0,
        reward: "Raise ₹2,500 - Exclusive T-shirt",
        detail: "Get your custom made t-shirt!",
        label_threshold: 1_000.0,
    },
    Milestone {
        threshold: 5_000.0,
        reward: "Raise ₹5,000 - Goodies and Swag Bag",
        detail: "Get our Goodies and Swag bag and many more..",
        label_threshold: 2_500.0,
    },
    Milestone {
        threshold: 10_000.0,
        reward: "Raise ₹10,000 - LOR (Letter of Recommendation)",
        detail: "Get a Letter of Reccomendation from our HR",
        label_threshold: 5_000.0,
    },
    Milestone {
        threshold: 20_000.0,
        reward: "Raise ₹20,000 - Extension of Internship for 3 more months",
        detail: "Opportunity for full-time role",
        label_threshold: 10_000.0,
    },
];

impl Milestone {
    /// A milestone is achieved iff the raised total meets its own
    /// threshold.
    pub fn achieved(&self, donations_raised: f64) -> bool {
        donations_raised >= self.threshold
    }

    /// Whether the reward label renders in its achieved styling. Not the
    /// same cutoff as [`Milestone::achieved`]; see `label_threshold`.
    pub fn label_highlighted(&self, donations_raised: f64) -> bool {
        donations_raised >= self.label_threshold
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_each_threshold_is_independent() {
        for milestone in &MILESTONES {
            assert!(!milestone.achieved(milestone.threshold - 0.01));
            assert!(milestone.achieved(milestone.threshold));
            assert!(milestone.achieved(milestone.threshold + 1.0));
        }
    }

    #[test]
    fn test_achieving_one_tier_does_not_imply_the_next() {
        let achieved: Vec<_> = MILESTONES
            .iter()
            .map(|milestone| milestone.achieved(2_500.0))
            .collect();

        assert_eq!(achieved, [true, false, false, false]);
    }

    #[test]
    fn test_label_highlight_lags_one_tier() {
        let first = MILESTONES.first().unwrap();

        // At 1 000 the t-shirt label already lights up even though the
        // milestone itself is unachieved.
        assert!(first.label_highlighted(1_000.0));
        assert!(!first.achieved(1_000.0));

        for milestone in &MILESTONES {
            assert!(milestone.label_threshold < milestone.threshold);
        }
    }
}
