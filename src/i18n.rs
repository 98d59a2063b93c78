use crate::models::Language;

/// UI labels for one language.
pub struct Translations {
    pub app_title: &'static str,
    pub tagline: &'static str,
    pub footer: &'static str,
    pub upload_title: &'static str,
    pub upload_desc: &'static str,
    pub upload_btn: &'static str,
    pub loading_clutter: &'static str,
    pub loading_refining: &'static str,
    pub questions_title: &'static str,
    pub questions_subtitle: &'static str,
    pub questions_placeholder: &'static str,
    pub questions_btn: &'static str,
    pub advice_title: &'static str,
    pub advice_archived: &'static str,
    pub observation: &'static str,
    pub action: &'static str,
    pub reflection: &'static str,
    pub new_journey: &'static str,
    pub back_archive: &'static str,
    pub archive_title: &'static str,
    pub clear_total: &'static str,
    pub empty_archive: &'static str,
    pub back_start: &'static str,
    pub clear_confirm: &'static str,
    pub answer_required: &'static str,
    pub retry_prompt: &'static str,
    pub error_analyze: &'static str,
    pub error_advice: &'static str,
}

const EN: Translations = Translations {
    app_title: "Minimalist Lens",
    tagline: "Less is more",
    footer: "Embrace the space between things",
    upload_title: "Identify a distraction",
    upload_desc: "Upload a photo of an item or space you wish to simplify.",
    upload_btn: "Start Process",
    loading_clutter: "Analyzing clutter...",
    loading_refining: "Refining thoughts...",
    questions_title: "Questioning Value",
    questions_subtitle: "Honesty leads to freedom.",
    questions_placeholder: "Reflect here...",
    questions_btn: "Find Clarity",
    advice_title: "The Result",
    advice_archived: "Archived Insight",
    observation: "Observation",
    action: "Action",
    reflection: "Quiet Reflection",
    new_journey: "New Journey",
    back_archive: "Back to Archive",
    archive_title: "The Archive",
    clear_total: "Clear Total",
    empty_archive: "The archive is empty. A clean slate.",
    back_start: "Back to Start",
    clear_confirm: "Are you sure you want to clear all history? This aligns with total minimalism.",
    answer_required: "Please answer every question before continuing.",
    retry_prompt: "Try again? [Y/n] ",
    error_analyze: "Failed to analyze the image. Please try again.",
    error_advice: "Failed to generate advice. Please try again.",
};

const ZH: Translations = Translations {
    app_title: "Minimalist Lens",
    tagline: "极简，即是自由",
    footer: "拥抱万物之间的留白",
    upload_title: "识别干扰",
    upload_desc: "上传一张你希望简化的物品或空间的图片。",
    upload_btn: "开始分析",
    loading_clutter: "正在分析杂物...",
    loading_refining: "正在提炼思考...",
    questions_title: "质疑价值",
    questions_subtitle: "诚实带来自由。",
    questions_placeholder: "在此记录你的想法...",
    questions_btn: "寻找清晰",
    advice_title: "分析结果",
    advice_archived: "已存档的洞察",
    observation: "观察",
    action: "建议行动",
    reflection: "静心沉思",
    new_journey: "开启新旅程",
    back_archive: "返回存档",
    archive_title: "存档记录",
    clear_total: "清空所有",
    empty_archive: "存档已空。一切归零。",
    back_start: "返回首页",
    clear_confirm: "确定要清空所有记录吗？这符合极简主义的原则。",
    answer_required: "请先回答所有问题。",
    retry_prompt: "是否重试？[Y/n] ",
    error_analyze: "图片分析失败，请重试。",
    error_advice: "建议生成失败，请重试。",
};

pub fn translations(language: Language) -> &'static Translations {
    match language {
        Language::En => &EN,
        Language::Zh => &ZH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_prompt_is_localized() {
        assert_eq!(translations(Language::En).retry_prompt, "Try again? [Y/n] ");
        assert_eq!(translations(Language::Zh).retry_prompt, "是否重试？[Y/n] ");
    }
}
