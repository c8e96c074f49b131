/// Label shown for items whose category no longer exists
pub const UNKNOWN_CATEGORY_LABEL: &str = "Unknown";

/// Maximum length accepted for category and item titles
pub const MAX_TITLE_LENGTH: u64 = 200;

/// Length cap of the random base-36 token in generated image filenames
pub const IMAGE_TOKEN_LENGTH: usize = 13;

// =============================================================================
// ADMIN MESSAGES
// =============================================================================

pub const MSG_FETCH_FAILED: &str = "Failed to fetch data. Please check the server log for details.";
pub const MSG_ADD_CATEGORY_FAILED: &str =
    "Failed to add category. Please check the server log for details.";
pub const MSG_UPDATE_CATEGORY_FAILED: &str =
    "Failed to update category. Please check the server log for details.";
pub const MSG_DELETE_CATEGORY_FAILED: &str =
    "Failed to delete category. Please check the server log for details.";
pub const MSG_SAVE_ITEM_FAILED: &str =
    "Failed to save item. Please check the server log for details.";
pub const MSG_DELETE_ITEM_FAILED: &str =
    "Failed to delete item. Please check the server log for details.";
pub const MSG_UPLOAD_FAILED: &str = "Failed to upload image. Please try again.";
pub const MSG_ITEM_REQUIRED_FIELDS: &str = "Title and category are required";
pub const MSG_CATEGORY_TITLE_REQUIRED: &str = "Category title is required";
