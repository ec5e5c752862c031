use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::operations::{Operation, OperationKind};
use super::status::Status;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("unknown operation type '{0}'")]
    UnknownKind(String),
    #[error("unknown status '{0}'")]
    UnknownStatus(String),
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("date range starts after it ends")]
    InvertedRange,
    #[error("status '{status}' does not apply to {kind} operations")]
    StatusNotApplicable { status: Status, kind: OperationKind },
}

impl FilterError {
    pub fn user_message(&self) -> &'static str {
        match self {
            FilterError::InvertedRange => "วันที่เริ่มต้นต้องไม่มากกว่าวันที่สิ้นสุด",
            FilterError::InvalidDate(_) => "รูปแบบวันที่ไม่ถูกต้อง",
            FilterError::UnknownKind(_)
            | FilterError::UnknownStatus(_)
            | FilterError::StatusNotApplicable { .. } => "ตัวกรองไม่ถูกต้อง",
        }
    }
}

/// Inclusive calendar-day window `[start 00:00:00, end 23:59:59]`; either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self, FilterError> {
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(FilterError::InvertedRange);
            }
        }
        Ok(Self { start, end })
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Result<Self, FilterError> {
        Self::new(Some(start), Some(end))
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    pub fn contains(&self, operation: &Operation) -> bool {
        let day = operation.created_at.date();
        self.start.map_or(true, |start| start <= day) && self.end.map_or(true, |end| day <= end)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationFilter {
    pub search: Option<String>,
    pub kind: Option<OperationKind>,
    pub status: Option<Status>,
    pub date_range: DateRange,
}

impl OperationFilter {
    /// Reject status filters that cannot occur for the selected type.
    pub fn validate(&self) -> Result<(), FilterError> {
        if let (Some(kind), Some(status)) = (self.kind, self.status) {
            if !kind.statuses().contains(&status) {
                return Err(FilterError::StatusNotApplicable { status, kind });
            }
        }
        Ok(())
    }

    pub fn matches(&self, operation: &Operation) -> bool {
        if let Some(search) = &self.search {
            if !operation.matches_search(search) {
                return false;
            }
        }
        if self.kind.is_some_and(|kind| kind != operation.kind) {
            return false;
        }
        if self.status.is_some_and(|status| status != operation.status) {
            return false;
        }
        self.date_range.contains(operation)
    }

    pub fn apply(&self, operations: Vec<Operation>) -> Vec<Operation> {
        operations
            .into_iter()
            .filter(|operation| self.matches(operation))
            .collect()
    }
}

/// Query-string form of [`OperationFilter`] plus the requested page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationQuery {
    pub user_id: String,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub page: Option<usize>,
}

impl OperationQuery {
    pub fn filter(&self) -> Result<OperationFilter, FilterError> {
        let kind = non_blank(&self.kind)
            .map(|raw| {
                raw.parse::<OperationKind>()
                    .map_err(|_| FilterError::UnknownKind(raw.to_string()))
            })
            .transpose()?;
        let status = non_blank(&self.status)
            .map(|raw| {
                raw.parse::<Status>()
                    .map_err(|_| FilterError::UnknownStatus(raw.to_string()))
            })
            .transpose()?;

        let filter = OperationFilter {
            search: non_blank(&self.search).map(str::to_string),
            kind,
            status,
            date_range: DateRange::new(
                non_blank(&self.from).map(parse_date).transpose()?,
                non_blank(&self.to).map(parse_date).transpose()?,
            )?,
        };
        filter.validate()?;
        Ok(filter)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|text| !text.is_empty())
}

fn parse_date(raw: &str) -> Result<NaiveDate, FilterError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| FilterError::InvalidDate(raw.to_string()))
}

/// One page of a filtered listing. Pages are 1-based.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub page_size: usize,
}

impl<T> Page<T> {
    /// Slice `items`; out-of-range pages clamp into `1..=total_pages`.
    pub fn paginate(items: Vec<T>, page: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let total_items = items.len();
        let total_pages = total_items.div_ceil(page_size).max(1);
        let current_page = page.clamp(1, total_pages);
        let items = items
            .into_iter()
            .skip((current_page - 1) * page_size)
            .take(page_size)
            .collect();

        Self {
            items,
            current_page,
            total_pages,
            total_items,
            page_size,
        }
    }
}
