/// Data-plane operations, used to phrase errors and label logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FindOrder,
    ValidateItems,
    CreateOrder,
    BulkImport,
    SearchUoms,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::FindOrder => "find_order",
            Operation::ValidateItems => "validate_items",
            Operation::CreateOrder => "create_order",
            Operation::BulkImport => "bulk_import_orders",
            Operation::SearchUoms => "search_uoms",
        }
    }

    /// Leads the error when the upstream answers with a non-2xx status.
    pub fn failure_prefix(self) -> &'static str {
        match self {
            Operation::FindOrder => "Invalid Order",
            Operation::ValidateItems => "Validation failed",
            Operation::CreateOrder => "Create failed",
            Operation::BulkImport => "Bulk import failed",
            Operation::SearchUoms => "Search failed",
        }
    }

    /// What was being attempted, for transport failures.
    pub fn activity(self) -> &'static str {
        match self {
            Operation::FindOrder => "finding order",
            Operation::ValidateItems => "validating items",
            Operation::CreateOrder => "creating order",
            Operation::BulkImport => "importing orders",
            Operation::SearchUoms => "searching UOMs",
        }
    }

    pub fn invalid_format_message(self) -> &'static str {
        match self {
            Operation::FindOrder => "Invalid Order - Invalid response format",
            _ => "Invalid response format",
        }
    }
}
