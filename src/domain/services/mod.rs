// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含不依赖外部基础设施的纯业务逻辑：
/// - 列表服务（listing_service）：从列表页提取详情URL
/// - 提取服务（extraction_service）：从详情页提取拍卖字段与主图
/// - 规范化（normalization）：型号、品牌、电池容量等清洗规则
/// - 导出服务（export_service）：CSV文件导出
pub mod export_service;
pub mod extraction_service;
pub mod listing_service;
pub mod normalization;
