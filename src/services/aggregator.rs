//! 知识点汇总服务 - 业务能力层
//!
//! 把错题按知识点分组计数并排序，结果只依赖输入顺序，不依赖哈希表遍历顺序。

use crate::models::record::parse_question_id;
use crate::models::{ErrorRecord, KnowledgeGroup, UNPARSEABLE_SORT_KEY};
use std::cmp::Ordering;
use std::collections::HashMap;

/// 按知识点汇总错题
///
/// # 参数
/// - `records`: 错题列表
/// - `min_count`: 至少出现几次的知识点才保留（含）
///
/// # 返回
/// 按错误次数降序、最小题号升序排列的知识点
pub fn aggregate(records: &[ErrorRecord], min_count: usize) -> Vec<KnowledgeGroup> {
    // 保留首次出现顺序，作为最后的平局规则
    let mut order: Vec<(&str, Vec<&str>)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let kp = record.knowledge_point.as_str();
        let slot = *index.entry(kp).or_insert_with(|| {
            order.push((kp, Vec::new()));
            order.len() - 1
        });
        order[slot].1.push(record.question_id.as_str());
    }

    let mut groups: Vec<KnowledgeGroup> = order
        .into_iter()
        .filter(|(_, ids)| ids.len() >= min_count)
        .map(|(kp, ids)| build_group(kp, &ids))
        .collect();

    groups.sort_by(|a, b| {
        b.error_count
            .cmp(&a.error_count)
            .then_with(|| a.sort_key.total_cmp(&b.sort_key))
    });

    groups
}

fn build_group(knowledge_point: &str, ids: &[&str]) -> KnowledgeGroup {
    let question_ids = sort_question_ids(ids);
    let sort_key = ids
        .iter()
        .filter_map(|id| parse_question_id(id))
        .min_by(f64::total_cmp)
        .unwrap_or(UNPARSEABLE_SORT_KEY);

    KnowledgeGroup {
        knowledge_point: knowledge_point.to_string(),
        error_count: ids.len(),
        question_ids,
        sort_key,
        highlighted: false,
    }
}

/// 题号排序：能解析为数字的按数值升序，其余按原顺序排在最后
pub fn sort_question_ids(ids: &[&str]) -> Vec<String> {
    let mut keyed: Vec<(Option<f64>, &str)> =
        ids.iter().map(|id| (parse_question_id(id), *id)).collect();

    // sort_by 是稳定排序，无法解析的题号之间保持原顺序
    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    keyed.into_iter().map(|(_, id)| id.to_string()).collect()
}

/// 计算重点复习门槛
///
/// 取第 `top_ranks` 大的不同错误次数；不同次数不足时取最小的那个。
/// 没有知识点或 `top_ranks` 为 0 时返回 None。
pub fn highlight_threshold(groups: &[KnowledgeGroup], top_ranks: usize) -> Option<usize> {
    if top_ranks == 0 {
        return None;
    }

    let mut counts: Vec<usize> = groups.iter().map(|g| g.error_count).collect();
    counts.sort_unstable_by(|a, b| b.cmp(a));
    counts.dedup();

    counts
        .get(top_ranks - 1)
        .or_else(|| counts.last())
        .copied()
}

/// 标记重点复习的知识点（错误次数不低于门槛）
pub fn mark_highlights(groups: &mut [KnowledgeGroup], top_ranks: usize) {
    let threshold = highlight_threshold(groups, top_ranks);
    for group in groups.iter_mut() {
        group.highlighted = threshold.is_some_and(|t| group.error_count >= t);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(pairs: &[(&str, &str)]) -> Vec<ErrorRecord> {
        pairs
            .iter()
            .map(|(q, kp)| ErrorRecord::new(*q, "A", *kp))
            .collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate(&[], 1).is_empty());
        assert_eq!(highlight_threshold(&[], 2), None);
    }

    #[test]
    fn test_order_by_count_then_first_question() {
        let input = records(&[
            ("1", "C"),
            ("5", "A"),
            ("6", "A"),
            ("7", "A"),
            ("2", "B"),
            ("8", "B"),
            ("9", "B"),
        ]);
        let groups = aggregate(&input, 1);
        let summary: Vec<(usize, f64)> =
            groups.iter().map(|g| (g.error_count, g.sort_key)).collect();
        assert_eq!(summary, vec![(3, 2.0), (3, 5.0), (1, 1.0)]);
        assert_eq!(groups[0].knowledge_point, "B");
        assert_eq!(groups[1].knowledge_point, "A");
    }

    #[test]
    fn test_counts_sum_to_record_count() {
        let input = records(&[("1", "x"), ("2", "y"), ("3", "x"), ("4", "z"), ("5", "x")]);
        let total: usize = aggregate(&input, 1).iter().map(|g| g.error_count).sum();
        assert_eq!(total, input.len());
    }

    #[test]
    fn test_min_count_filter() {
        let input = records(&[("1", "Grammar"), ("2", "Vocab")]);
        assert!(aggregate(&input, 2).is_empty());

        let input = records(&[("1", "Grammar"), ("2", "Vocab"), ("3", "Grammar")]);
        let groups = aggregate(&input, 2);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].knowledge_point, "Grammar");
    }

    #[test]
    fn test_question_id_sorting() {
        assert_eq!(sort_question_ids(&["10", "abc", "2"]), vec!["2", "10", "abc"]);
        assert_eq!(
            sort_question_ids(&["z", "3", "a", "1"]),
            vec!["1", "3", "z", "a"]
        );
    }

    #[test]
    fn test_unparseable_sort_key() {
        let input = records(&[("甲", "K1"), ("乙", "K1"), ("4", "K2"), ("x", "K2")]);
        let groups = aggregate(&input, 1);
        assert_eq!(groups[0].knowledge_point, "K2");
        assert_eq!(groups[0].sort_key, 4.0);
        assert_eq!(groups[1].sort_key, UNPARSEABLE_SORT_KEY);
        assert_eq!(groups[1].question_ids, vec!["甲", "乙"]);
    }

    #[test]
    fn test_case_sensitive_grouping() {
        let input = records(&[("1", "Grammar"), ("2", "grammar")]);
        assert_eq!(aggregate(&input, 1).len(), 2);
    }

    #[test]
    fn test_idempotent() {
        let input = records(&[("3", "a"), ("1", "b"), ("2", "a"), ("x", "c"), ("y", "d")]);
        assert_eq!(aggregate(&input, 1), aggregate(&input, 1));
    }

    #[test]
    fn test_highlight_top_two_with_ties() {
        let input = records(&[
            ("1", "A"),
            ("2", "A"),
            ("3", "A"),
            ("4", "B"),
            ("5", "B"),
            ("6", "C"),
            ("7", "C"),
            ("8", "D"),
        ]);
        let mut groups = aggregate(&input, 1);
        assert_eq!(highlight_threshold(&groups, 2), Some(2));
        mark_highlights(&mut groups, 2);
        let flags: Vec<bool> = groups.iter().map(|g| g.highlighted).collect();
        assert_eq!(flags, vec![true, true, true, false]);
    }

    #[test]
    fn test_highlight_single_count_and_disabled() {
        let input = records(&[("1", "A"), ("2", "B")]);
        let mut groups = aggregate(&input, 1);
        assert_eq!(highlight_threshold(&groups, 2), Some(1));
        mark_highlights(&mut groups, 0);
        assert!(groups.iter().all(|g| !g.highlighted));
    }
}
