use std::fmt::Write as _;

use crate::layout::element::ElementContent;
use crate::layout::model::Layout;
use crate::personalize::template::Placeholder;

/// Message used when a layout has nothing to personalize.
pub const EMPTY_RULES_MESSAGE: &str =
    "No personalization rules defined. Please add and position a logo or text element.";

const RULES_HEADER: &str =
    "Personalize the banner according to the following rules, processed in order:";

/// Describe `layout` as numbered natural-language rules in compositing order.
///
/// Output is a pure function of the layout, so it can be diffed or handed to reviewers.
pub fn describe_layout(layout: &Layout) -> String {
    if layout.is_empty() {
        return EMPTY_RULES_MESSAGE.to_string();
    }

    let rules: Vec<String> = layout
        .iter()
        .enumerate()
        .map(|(index, el)| {
            let mut rule = format!("Rule for element {}:\n", index + 1);
            match &el.content {
                ElementContent::Logo => rule.push_str("- This element is the shop's logo.\n"),
                ElementContent::Text(t) => {
                    let _ = writeln!(
                        rule,
                        "- This element is a text block containing: \"{}\". Use the shop's actual name where \"{}\" is present.",
                        t.template,
                        Placeholder::ShopName
                    );
                    let _ = writeln!(
                        rule,
                        "- The text color should be {} and the font weight should be {}.",
                        t.color, t.font_weight
                    );
                    let _ = writeln!(
                        rule,
                        "- Use the \"{}\" font family with {}px letter spacing.",
                        t.font_family,
                        num(t.letter_spacing)
                    );
                }
            }
            let _ = writeln!(
                rule,
                "- Position the element with its center at {}% from the left and {}% from the top of the banner.",
                num(el.x),
                num(el.y)
            );
            let _ = writeln!(
                rule,
                "- Scale the element to be {}% of the banner's width (for logos) or height (for text).",
                num(el.scale)
            );
            let _ = writeln!(rule, "- Apply a rotation of {} degrees.", num(el.rotation));
            let _ = writeln!(rule, "- Set the opacity to {}%.", num(el.opacity));
            rule
        })
        .collect();

    format!("{RULES_HEADER}\n\n{}", rules.join("\n"))
}

// Two decimals at most; integral values print without a fraction.
fn num(v: f64) -> f64 {
    let r = (v * 100.0).round() / 100.0;
    if r == 0.0 { 0.0 } else { r }
}

#[cfg(test)]
#[path = "../../tests/unit/personalize/rules.rs"]
mod tests;
