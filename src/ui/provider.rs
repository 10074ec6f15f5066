//! 页面提供者
//!
//! 序号 <-> 页面 的双向查找表。每次调用都新建页面，调用之间没有共享状态。

use crate::models::{PAGE_COUNT, Page};

/// 页面提供者，首末页的主操作在构造时注入
#[derive(Debug, Clone)]
pub struct PageProvider<A> {
    primary_action: A,
}

impl<A: Clone> PageProvider<A> {
    pub fn new(primary_action: A) -> Self {
        Self { primary_action }
    }

    pub fn page_count(&self) -> usize {
        PAGE_COUNT
    }

    /// 根据序号创建页面，越界返回 None
    pub fn page(&self, index: usize) -> Option<Page<A>> {
        let page = match index {
            0 => Page::Welcome(self.primary_action.clone()),
            1 => Page::Sensors,
            2 => Page::Experiments,
            3 => Page::Observations,
            4 => Page::Recording,
            5 => Page::Sync,
            6 => Page::Finish(self.primary_action.clone()),
            _ => return None,
        };
        Some(page)
    }

    /// 根据页面种类反查序号，枚举封闭所以总能查到
    pub fn index(&self, page: &Page<A>) -> usize {
        match page {
            Page::Welcome(_) => 0,
            Page::Sensors => 1,
            Page::Experiments => 2,
            Page::Observations => 3,
            Page::Recording => 4,
            Page::Sync => 5,
            Page::Finish(_) => 6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Close;

    #[test]
    fn test_round_trip() {
        let provider = PageProvider::new(Close);
        for i in 0..PAGE_COUNT {
            let page = provider.page(i).unwrap();
            assert_eq!(provider.index(&page), i);
        }
    }

    #[test]
    fn test_out_of_range() {
        let provider = PageProvider::new(Close);
        assert!(provider.page(PAGE_COUNT).is_none());
        assert!(provider.page(usize::MAX).is_none());
        assert!(0usize.checked_sub(1).and_then(|i| provider.page(i)).is_none());
    }

    #[test]
    fn test_primary_action_only_on_boundaries() {
        let provider = PageProvider::new(Close);
        let with_action: Vec<usize> = (0..PAGE_COUNT)
            .filter(|&i| provider.page(i).unwrap().primary_action().is_some())
            .collect();
        assert_eq!(with_action, vec![0, PAGE_COUNT - 1]);
        assert_eq!(provider.page(0).unwrap().primary_action(), Some(&Close));
    }
}
