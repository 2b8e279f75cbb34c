use std::collections::HashMap;
use std::sync::LazyLock;

use super::Language;

const EN: &[(&str, &str)] = &[
    ("appName", "SpendWise"),
    ("dashboard", "Dashboard"),
    ("expenses", "Expenses"),
    ("budgets", "Budgets"),
    ("planner", "Planner"),
    ("totalSpent", "Total Spent"),
    ("totalBudget", "Total Budget"),
    ("remainingBudget", "Remaining Budget"),
    ("inTheCurrentMonth", "In the current month"),
    ("forThisMonth", "For this month"),
    ("youAreOverBudget", "You are over budget"),
    ("remainingForThisMonth", "Remaining for this month"),
    ("spendingByCategory", "Spending by Category"),
    ("noSpendingData", "No spending data for this period."),
    ("recentExpenses", "Recent Expenses"),
    ("last5Transactions", "Your last 5 transactions"),
    ("noExpenses", "No expenses yet. Add one with :add"),
    ("date", "Date"),
    ("description", "Description"),
    ("category", "Category"),
    ("amount", "Amount"),
    ("addExpense", "Add Expense"),
    ("expenseAdded", "Expense added successfully!"),
    ("budgetGoals", "Budget Goals"),
    ("monthlyBudgetStatus", "Your monthly budget status"),
    ("editBudgets", "Edit Budgets"),
    ("saveChanges", "Save Changes"),
    ("budgetsUpdated", "Budgets updated successfully!"),
    ("getAISuggestions", "Get AI Suggestions"),
    ("generating", "Generating"),
    ("suggestion", "Suggestion"),
    ("failedSuggestions", "Failed to get AI suggestions. Please try again."),
    ("aiBudgetPlanner", "AI Budget Planner"),
    (
        "enterTotalBudgetSuggestion",
        "Enter your total monthly budget to get a suggested allocation.",
    ),
    ("totalMonthlyBudget", "Total Monthly Budget"),
    ("generatePlan", "Generate Plan"),
    ("generatingPlan", "Generating plan"),
    ("suggestedBudgetPlan", "Suggested Budget Plan"),
    ("suggestedBudget", "Suggested Budget"),
    ("failedPlan", "Failed to generate budget plan. Please try again."),
    (
        "advisorNotConfigured",
        "AI advisor is not configured. Set SPENDWISE_ADVISOR.",
    ),
    ("settings", "Settings"),
    ("customizeYourExperience", "Customize your experience"),
    ("darkMode", "Dark Mode"),
    ("language", "Language"),
    ("currency", "Currency"),
    ("success", "Success"),
    ("error", "Error"),
    ("cancel", "Cancel"),
    ("food", "Food"),
    ("transportation", "Transportation"),
    ("housing", "Housing"),
    ("shopping", "Shopping"),
    ("health", "Health"),
    ("entertainment", "Entertainment"),
];

const HI: &[(&str, &str)] = &[
    ("appName", "स्पेंडवाइज़"),
    ("dashboard", "डैशबोर्ड"),
    ("expenses", "खर्च"),
    ("budgets", "बजट"),
    ("planner", "योजनाकार"),
    ("totalSpent", "कुल खर्च"),
    ("totalBudget", "कुल बजट"),
    ("remainingBudget", "शेष बजट"),
    ("inTheCurrentMonth", "चालू महीने में"),
    ("forThisMonth", "इस महीने के लिए"),
    ("youAreOverBudget", "आप बजट से अधिक हैं"),
    ("remainingForThisMonth", "इस महीने के लिए शेष"),
    ("spendingByCategory", "श्रेणी के अनुसार खर्च"),
    ("noSpendingData", "इस अवधि के लिए कोई खर्च डेटा नहीं है।"),
    ("recentExpenses", "हाल के खर्च"),
    ("last5Transactions", "आपके पिछले 5 लेन-देन"),
    ("noExpenses", "अभी तक कोई खर्च नहीं। :add से जोड़ें"),
    ("date", "तारीख"),
    ("description", "विवरण"),
    ("category", "श्रेणी"),
    ("amount", "राशि"),
    ("addExpense", "खर्च जोड़ें"),
    ("expenseAdded", "खर्च सफलतापूर्वक जोड़ा गया!"),
    ("budgetGoals", "बजट लक्ष्य"),
    ("monthlyBudgetStatus", "आपकी मासिक बजट स्थिति"),
    ("editBudgets", "बजट संपादित करें"),
    ("saveChanges", "परिवर्तन सहेजें"),
    ("budgetsUpdated", "बजट सफलतापूर्वक अपडेट किए गए!"),
    ("getAISuggestions", "एआई सुझाव प्राप्त करें"),
    ("generating", "बना रहे हैं"),
    ("suggestion", "सुझाव"),
    (
        "failedSuggestions",
        "एआई सुझाव प्राप्त करने में विफल। कृपया पुनः प्रयास करें।",
    ),
    ("aiBudgetPlanner", "एआई बजट योजनाकार"),
    (
        "enterTotalBudgetSuggestion",
        "सुझाया गया आवंटन पाने के लिए अपना कुल मासिक बजट दर्ज करें।",
    ),
    ("totalMonthlyBudget", "कुल मासिक बजट"),
    ("generatePlan", "योजना बनाएं"),
    ("generatingPlan", "योजना बना रहे हैं"),
    ("suggestedBudgetPlan", "सुझाई गई बजट योजना"),
    ("suggestedBudget", "सुझाया गया बजट"),
    ("failedPlan", "बजट योजना बनाने में विफल। कृपया पुनः प्रयास करें।"),
    (
        "advisorNotConfigured",
        "एआई सलाहकार कॉन्फ़िगर नहीं है। SPENDWISE_ADVISOR सेट करें।",
    ),
    ("settings", "सेटिंग्स"),
    ("customizeYourExperience", "अपना अनुभव अनुकूलित करें"),
    ("darkMode", "डार्क मोड"),
    ("language", "भाषा"),
    ("currency", "मुद्रा"),
    ("success", "सफल"),
    ("error", "त्रुटि"),
    ("cancel", "रद्द करें"),
    ("food", "भोजन"),
    ("transportation", "परिवहन"),
    ("housing", "आवास"),
    ("shopping", "खरीदारी"),
    ("health", "स्वास्थ्य"),
    ("entertainment", "मनोरंजन"),
];

static EN_TABLE: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| EN.iter().copied().collect());
static HI_TABLE: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| HI.iter().copied().collect());

pub(crate) fn translate(language: Language, key: &str) -> Option<&'static str> {
    let table = match language {
        Language::En => &EN_TABLE,
        Language::Hi => &HI_TABLE,
    };
    table.get(key).copied()
}

#[cfg(test)]
pub(crate) fn keys(language: Language) -> Vec<&'static str> {
    match language {
        Language::En => EN.iter().map(|(k, _)| *k).collect(),
        Language::Hi => HI.iter().map(|(k, _)| *k).collect(),
    }
}
