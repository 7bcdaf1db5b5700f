use serde::{Deserialize, Serialize};

use crate::error::{Error, PaginationError};

const fn page_default() -> i64 { 1 }

/// Pagination request parameters
///
/// Pages are 1-based on the wire; every listing endpoint fixes its own page
/// size and sort order
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct PageParam {
	#[serde(default = "page_default")]
	pub page: i64,
}

impl Default for PageParam {
	fn default() -> Self { Self { page: 1 } }
}

/// A resolved page of a listing, 0-based internally
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
	index: i64,
	size:  i64,
}

impl PageRequest {
	/// Resolve a 1-based page strictly: a page below 1 is an error
	///
	/// Account-scoped and admin listings use this policy
	pub fn strict(page: i64, size: i64) -> Result<Self, Error> {
		if page < 1 {
			return Err(PaginationError::PageIndexNegative(page).into());
		}

		Ok(Self { index: page - 1, size })
	}

	/// Resolve a 1-based page leniently: out-of-range pages clamp to the
	/// nearest valid page
	///
	/// Public listings use this policy
	#[must_use]
	pub fn lenient(page: i64, size: i64, total: i64) -> Self {
		let last = (total_pages(total, size) - 1).max(0);

		Self { index: (page - 1).clamp(0, last), size }
	}

	/// Calculate the SQL LIMIT value of this page
	#[inline]
	#[must_use]
	pub fn limit(&self) -> i64 { self.size }

	/// Calculate the SQL OFFSET value of this page
	#[inline]
	#[must_use]
	pub fn offset(&self) -> i64 { self.index * self.size }

	/// Create a [`Paginated`] struct around the given data
	pub fn paginate<T>(&self, total: i64, data: T) -> Paginated<T> {
		Paginated {
			page: self.index + 1,
			per_page: self.size,
			pages: total_pages(total, self.size),
			total,
			data,
		}
	}
}

/// Total page count of a listing: `ceil(total / size)`, zero when empty
#[must_use]
pub fn total_pages(total: i64, size: i64) -> i64 {
	if total == 0 { 0 } else { (total + size - 1) / size }
}

/// One page of a listing
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
	pub page:     i64,
	pub per_page: i64,
	pub pages:    i64,
	pub total:    i64,

	pub data: T,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn page_count_is_ceiled() {
		assert_eq!(total_pages(1, 5), 1);
		assert_eq!(total_pages(5, 5), 1);
		assert_eq!(total_pages(6, 5), 2);
		assert_eq!(total_pages(11, 5), 3);
		assert_eq!(total_pages(30, 10), 3);
	}

	#[test]
	fn empty_listings_have_zero_pages() {
		assert_eq!(total_pages(0, 5), 0);
		assert_eq!(total_pages(0, 10), 0);
	}

	#[test]
	fn strict_rejects_pages_below_one() {
		assert!(matches!(
			PageRequest::strict(0, 5),
			Err(Error::PaginationError(
				PaginationError::PageIndexNegative(0)
			))
		));
		assert!(matches!(
			PageRequest::strict(-1, 5),
			Err(Error::PaginationError(
				PaginationError::PageIndexNegative(-1)
			))
		));
	}

	#[test]
	fn strict_resolves_to_zero_based_index() {
		let page = PageRequest::strict(3, 5).unwrap();

		assert_eq!(page.offset(), 10);
		assert_eq!(page.limit(), 5);
	}

	#[test]
	fn lenient_clamps_to_first_page() {
		let page = PageRequest::lenient(-4, 5, 12);

		assert_eq!(page.offset(), 0);
	}

	#[test]
	fn lenient_clamps_to_last_page() {
		let page = PageRequest::lenient(99, 5, 12);

		// 12 records over 3 pages; the last page starts at offset 10
		assert_eq!(page.offset(), 10);
	}

	#[test]
	fn lenient_handles_empty_listings() {
		let page = PageRequest::lenient(7, 5, 0);

		assert_eq!(page.offset(), 0);
		assert_eq!(page.paginate(0, Vec::<i32>::new()).pages, 0);
	}

	#[test]
	fn paginate_reports_the_resolved_page() {
		let page = PageRequest::strict(2, 5).unwrap();
		let listing = page.paginate(12, vec![1, 2, 3, 4, 5]);

		assert_eq!(listing.page, 2);
		assert_eq!(listing.per_page, 5);
		assert_eq!(listing.pages, 3);
		assert_eq!(listing.total, 12);
		assert_eq!(listing.data.len(), 5);
	}
}
