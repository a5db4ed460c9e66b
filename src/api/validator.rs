// ==========================================
// 卡车租赁 - 表单输入校验器
// ==========================================
// 职责: 货重/日期/手动选择的边界校验与归一化
// ==========================================

use crate::api::dto::WeightInput;
use crate::api::error::{ApiError, ApiResult};
use crate::domain::truck::Truck;
use crate::engine::calendar_day::CalendarDayNormalizer;
use chrono::NaiveDate;
use std::collections::HashSet;

/// 解析目标货重（吨）
///
/// # 返回
/// - Ok(f64): 有限正数
/// - Err(ApiError::InvalidInput): 非数值 / 非有限 / 非正数
pub fn parse_target_weight(input: &WeightInput) -> ApiResult<f64> {
    let value = match input {
        WeightInput::Number(v) => *v,
        WeightInput::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Err(ApiError::InvalidInput("货物重量不能为空".to_string()));
            }
            trimmed
                .parse::<f64>()
                .map_err(|_| ApiError::InvalidInput(format!("货物重量不是数值: {}", trimmed)))?
        }
    };

    if !value.is_finite() || value <= 0.0 {
        return Err(ApiError::InvalidInput(format!("货物重量必须大于 0: {}", value)));
    }
    Ok(value)
}

/// 解析配送日期
///
/// 空值表示尚未选择日期（浏览模式）。
pub fn parse_target_date(
    text: Option<&str>,
    normalizer: &CalendarDayNormalizer,
) -> ApiResult<Option<NaiveDate>> {
    let text = match text.map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => return Ok(None),
    };
    normalizer
        .normalize_text(text)
        .map(Some)
        .ok_or_else(|| ApiError::InvalidInput(format!("无法识别的配送日期: {}", text)))
}

/// 将手动选择的车辆ID解析为车辆（保持选择顺序，重复ID只取一次）
pub fn resolve_selection(fleet: &[Truck], selected_ids: &[String]) -> ApiResult<Vec<Truck>> {
    let mut seen = HashSet::new();
    let mut selected = Vec::with_capacity(selected_ids.len());
    for id in selected_ids {
        if !seen.insert(id.as_str()) {
            continue;
        }
        let truck = fleet
            .iter()
            .find(|t| &t.id == id)
            .ok_or_else(|| ApiError::UnknownTruck(id.clone()))?;
        selected.push(truck.clone());
    }
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_target_weight() {
        assert_eq!(parse_target_weight(&WeightInput::Number(4.0)).unwrap(), 4.0);
        assert_eq!(parse_target_weight(&" 2.5 ".into()).unwrap(), 2.5);

        for bad in ["", "abc", "NaN", "inf", "-1", "0"] {
            assert!(
                matches!(parse_target_weight(&bad.into()), Err(ApiError::InvalidInput(_))),
                "{:?} 应被拒绝",
                bad
            );
        }
        assert!(parse_target_weight(&WeightInput::Number(-3.0)).is_err());
    }

    #[test]
    fn test_parse_target_date() {
        let normalizer = CalendarDayNormalizer::utc();
        assert_eq!(parse_target_date(None, &normalizer).unwrap(), None);
        assert_eq!(parse_target_date(Some("  "), &normalizer).unwrap(), None);
        assert_eq!(
            parse_target_date(Some("2024-01-05"), &normalizer).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
        assert!(parse_target_date(Some("tomorrow"), &normalizer).is_err());
    }

    #[test]
    fn test_resolve_selection() {
        let fleet = vec![Truck::new("A", 2.0), Truck::new("B", 3.0)];
        let ids = vec!["B".to_string(), "A".to_string(), "B".to_string()];
        let selected = resolve_selection(&fleet, &ids).unwrap();
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].id, "B");

        let err = resolve_selection(&fleet, &["X".to_string()]).unwrap_err();
        assert!(matches!(err, ApiError::UnknownTruck(id) if id == "X"));
    }
}
