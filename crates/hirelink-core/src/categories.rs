//! Profession category table.
//!
//! Static keyword mapping used to bucket manpower profiles into browseable
//! categories. Like the location registry this is configuration data, not
//! procedural code; unlike the registry it is small enough to live as a
//! compile-time table.

/// A profession category with the keywords that select it and the icon name
/// the frontend renders for it.
#[derive(Debug, Clone, Copy)]
pub struct Category {
    pub name: &'static str,
    pub icon: &'static str,
    pub keywords: &'static [&'static str],
}

/// The fallback bucket; always last, matches nothing by keyword.
pub const OTHERS: &str = "Others";

pub const CATEGORIES: &[Category] = &[
    Category {
        name: "Heavy Equipment Operator",
        icon: "Truck",
        keywords: &[
            "operator", "crane", "forklift", "excavator", "loader", "bulldozer", "backhoe",
            "heavy equipment", "machinery",
        ],
    },
    Category {
        name: "Electrician",
        icon: "Zap",
        keywords: &["electrician", "electrical", "wiring", "electronics", "power", "voltage"],
    },
    Category {
        name: "Welder",
        icon: "Flame",
        keywords: &["welder", "welding", "fabrication", "metal work", "tig", "mig", "arc welding"],
    },
    Category {
        name: "Plumber",
        icon: "Wrench",
        keywords: &["plumber", "plumbing", "pipefitter", "pipe", "hvac"],
    },
    Category {
        name: "Carpenter",
        icon: "Hammer",
        keywords: &["carpenter", "carpentry", "woodwork", "joiner", "wood"],
    },
    Category {
        name: "Mechanic",
        icon: "Settings",
        keywords: &["mechanic", "mechanical", "maintenance", "repair", "technician"],
    },
    Category {
        name: "Construction Worker",
        icon: "HardHat",
        keywords: &["construction", "builder", "mason", "concrete", "laborer", "site worker"],
    },
    Category {
        name: "Supervisor",
        icon: "Users",
        keywords: &["supervisor", "foreman", "manager", "lead", "coordinator"],
    },
    Category {
        name: "Driver",
        icon: "Car",
        keywords: &["driver", "driving", "truck driver", "delivery"],
    },
    Category {
        name: "Safety Officer",
        icon: "Shield",
        keywords: &["safety", "hse", "health and safety", "safety officer"],
    },
];

/// A category with the number of profiles bucketed into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryCount {
    pub name: &'static str,
    pub icon: &'static str,
    pub count: usize,
}

/// Classify one profile by job title + description. First category whose
/// keyword occurs in the combined lowercased text wins; unmatched profiles
/// land in [`OTHERS`].
pub fn classify(job_title: &str, description: &str) -> &'static str {
    let combined = format!("{} {}", job_title.to_lowercase(), description.to_lowercase());
    CATEGORIES
        .iter()
        .find(|category| category.keywords.iter().any(|kw| combined.contains(kw)))
        .map_or(OTHERS, |category| category.name)
}

/// Bucket a set of (job title, description) pairs into category counts.
///
/// Empty categories are dropped; the rest sort by count descending with
/// [`OTHERS`] forced last.
pub fn tally<'a>(profiles: impl IntoIterator<Item = (&'a str, &'a str)>) -> Vec<CategoryCount> {
    let mut counts = vec![0usize; CATEGORIES.len()];
    let mut others = 0usize;

    for (title, description) in profiles {
        let name = classify(title, description);
        match CATEGORIES.iter().position(|c| c.name == name) {
            Some(i) => counts[i] += 1,
            None => others += 1,
        }
    }

    let mut out: Vec<CategoryCount> = CATEGORIES
        .iter()
        .zip(&counts)
        .filter(|(_, &count)| count > 0)
        .map(|(category, &count)| CategoryCount {
            name: category.name,
            icon: category.icon,
            count,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count));
    if others > 0 {
        out.push(CategoryCount {
            name: OTHERS,
            icon: "User",
            count: others,
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_title_keyword() {
        assert_eq!(classify("Senior Electrician", ""), "Electrician");
        assert_eq!(classify("Crane Operator", ""), "Heavy Equipment Operator");
    }

    #[test]
    fn falls_back_to_description() {
        assert_eq!(classify("Freelancer", "experienced in TIG welding"), "Welder");
    }

    #[test]
    fn unmatched_goes_to_others() {
        assert_eq!(classify("Accountant", "bookkeeping"), OTHERS);
    }

    #[test]
    fn first_matching_category_wins() {
        // "crane operator with electrical background" hits the operator
        // bucket before the electrician bucket.
        assert_eq!(
            classify("Crane Operator", "electrical background"),
            "Heavy Equipment Operator"
        );
    }

    #[test]
    fn tally_sorts_desc_with_others_last() {
        let counts = tally([
            ("Electrician", ""),
            ("Electrician", ""),
            ("Welder", ""),
            ("Accountant", ""),
        ]);
        let names: Vec<&str> = counts.iter().map(|c| c.name).collect();
        assert_eq!(names, ["Electrician", "Welder", OTHERS]);
        assert_eq!(counts[0].count, 2);
        assert_eq!(counts[2].icon, "User");
    }

    #[test]
    fn tally_drops_empty_categories() {
        let counts = tally([("Driver", "")]);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts[0].name, "Driver");
    }
}
