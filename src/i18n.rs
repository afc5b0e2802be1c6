//! Translation lookup table
//!
//! Text is resolved at render time from a `(language, key)` pair; nothing in the
//! reminder logic depends on it.

use serde::{Deserialize, Serialize};

/// Languages the surface can be rendered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    English,
    #[serde(rename = "中文")]
    Chinese,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::Chinese];

    /// Resolve a stored language name, falling back to English
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|lang| lang.name() == name.trim())
            .unwrap_or_default()
    }

    /// Name as stored in the settings record
    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Chinese => "中文",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKey {
    AppName,
    IntervalLabel,
    StartTimeLabel,
    EndTimeLabel,
    CountdownIdle,
    CountdownPrefix,
    StartButton,
    StopButton,
    AutoStartLabelOn,
    AutoStartLabelOff,
    SetAutoStart,
    RemoveAutoStart,
    SettingsButton,
    SettingsTitle,
    LanguageLabel,
    SaveButton,
    InvalidInput,
    IntervalError,
    IntervalInvalid,
    IntervalEmpty,
    TimeError,
    TimeInvalid,
    OutsideRange,
    DrinkWater,
    RestoreWindow,
    HideWindow,
    ExitButton,
    Acknowledge,
}

pub fn text(language: Language, key: TextKey) -> &'static str {
    use TextKey::*;

    match language {
        Language::English => match key {
            AppName => "Drink Water Reminder",
            IntervalLabel => "Reminder Interval (minutes):",
            StartTimeLabel => "Start Time (HH:MM):",
            EndTimeLabel => "End Time (HH:MM):",
            CountdownIdle => "Time Remaining: 00:00",
            CountdownPrefix => "Time Remaining",
            StartButton => "Start Reminder",
            StopButton => "Stop Reminder",
            AutoStartLabelOn => "Application set to auto-start",
            AutoStartLabelOff => "Application not set to auto-start",
            SetAutoStart => "Set Auto-start",
            RemoveAutoStart => "Remove Auto-start",
            SettingsButton => "Settings",
            SettingsTitle => "Settings",
            LanguageLabel => "Language:",
            SaveButton => "Save",
            InvalidInput => "Invalid Input",
            IntervalError => "Interval must be positive",
            IntervalInvalid => "Interval must be a number",
            IntervalEmpty => "Interval cannot be empty",
            TimeError => "End time must be after start time",
            TimeInvalid => "Time must be in HH:MM format",
            OutsideRange => "Outside reminder time range!",
            DrinkWater => "Time to drink water!",
            RestoreWindow => "Restore",
            HideWindow => "Hide",
            ExitButton => "Exit",
            Acknowledge => "OK",
        },
        Language::Chinese => match key {
            AppName => "喝水提醒",
            IntervalLabel => "提醒间隔（分钟）：",
            StartTimeLabel => "开始时间（HH:MM）：",
            EndTimeLabel => "结束时间（HH:MM）：",
            CountdownIdle => "剩余时间：00:00",
            CountdownPrefix => "剩余时间",
            StartButton => "开始提醒",
            StopButton => "停止提醒",
            AutoStartLabelOn => "应用已设为开机启动",
            AutoStartLabelOff => "应用未设为开机启动",
            SetAutoStart => "设置开机启动",
            RemoveAutoStart => "移除开机启动",
            SettingsButton => "设置",
            SettingsTitle => "设置",
            LanguageLabel => "语言：",
            SaveButton => "保存",
            InvalidInput => "输入无效",
            IntervalError => "间隔时间必须为正数",
            IntervalInvalid => "间隔时间必须为数字",
            IntervalEmpty => "间隔时间不能为空",
            TimeError => "结束时间必须晚于开始时间",
            TimeInvalid => "时间必须为HH:MM格式",
            OutsideRange => "不在提醒时间范围内！",
            DrinkWater => "该喝水了！",
            RestoreWindow => "恢复",
            HideWindow => "隐藏",
            ExitButton => "退出",
            Acknowledge => "确定",
        },
    }
}

/// Format the countdown line, e.g. `Time Remaining: 09:59`
pub fn countdown_text(language: Language, remaining_seconds: u64) -> String {
    let (minutes, seconds) = (remaining_seconds / 60, remaining_seconds % 60);
    format!(
        "{}: {:02}:{:02}",
        text(language, TextKey::CountdownPrefix),
        minutes,
        seconds
    )
}
