//! Page arithmetic for the mailbox list.

/// Number of pages for `total` items; never less than 1.
pub fn total_pages(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 1;
    }
    let pages = total.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX).max(1)
}

/// `true` when `page` is a requestable page for `total` items.
pub fn is_valid_page(page: u32, total: u64, page_size: u32) -> bool {
    (1..=total_pages(total, page_size)).contains(&page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(45, 20), 3);
        assert_eq!(total_pages(40, 20), 2);
        assert_eq!(total_pages(3, 20), 1);
        assert_eq!(total_pages(0, 20), 1);
        assert_eq!(total_pages(10, 0), 1);
    }

    #[test]
    fn test_valid_page_range() {
        assert!(!is_valid_page(0, 45, 20));
        assert!(is_valid_page(1, 45, 20));
        assert!(is_valid_page(3, 45, 20));
        assert!(!is_valid_page(4, 45, 20));
        assert!(is_valid_page(1, 0, 20));
    }
}
