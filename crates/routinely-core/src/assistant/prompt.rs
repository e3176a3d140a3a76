//! Fixed texts of the routine conversation.

use routinely_types::product::ProductSummary;

/// Reply recorded when the endpoint cannot be reached or answers badly.
pub const APOLOGY_REPLY: &str = "Sorry, there was an error contacting the assistant.";

/// User-facing stand-in for the routine instruction in the log and view.
pub const ROUTINE_PLACEHOLDER: &str = "Generate routine for selected products...";

/// Assistant-style notice when a routine is requested with nothing selected.
pub const NOTHING_SELECTED_NOTICE: &str =
    "Please select at least one product to generate a routine.";

/// Shown in an empty chat view.
pub const GREETING_PLACEHOLDER: &str =
    "Let's build your routine: select products and run Generate Routine";

/// Build the instruction that asks for a routine over `products`.
///
/// The products are embedded as pretty-printed JSON with 2-space indent.
pub fn routine_instruction(products: &[ProductSummary]) -> String {
    // Serializing plain string fields cannot fail.
    let listing = serde_json::to_string_pretty(products).unwrap_or_default();
    format!(
        "Please create a personalized routine using only the following products \
(return clearly labeled steps and product order). Respond in plain text. \n\nProducts:\n{listing}"
    )
}
