//! Standard US-GAAP income statement catalog.

pub(super) const CATEGORIES: &[&str] = &[
    "Revenues",
    "COR",
    "Operating Expenses",
    "NonOperatingExpense",
    "Income Before Tax",
    "Income Taxes",
    "Net Income",
    "Per Share Metrics",
];

/// `(concept id, label, unit, category)`
pub(super) const ENTRIES: &[(&str, &str, &str, &str)] = &[
    ("Revenues", "Total Net Revenues", "USD", "Revenues"),
    ("RevenueFromContractWithCustomerExcludingAssessedTax", "Total Revenues", "USD", "Revenues"),
    // Cost of revenue
    ("FloorBrokerageExchangeAndClearanceFees", "Brokerage and Transaction", "USD", "COR"),
    ("CostOfGoodsAndServicesSold", "Cost of Goods and Services Sold", "USD", "COR"),
    ("CostOfRevenue", "Cost of Revenue", "USD", "COR"),
    // Operating expenses
    ("AdvertisingExpense", "Advertising Expense", "USD", "Operating Expenses"),
    ("AllocatedShareBasedCompensationExpense", "Employee Stock Pay Cost", "USD", "Operating Expenses"),
    ("ResearchAndDevelopmentExpense", "Research and Development", "USD", "Operating Expenses"),
    ("CapitalizedComputerSoftwareAmortization1", "Software Amortization", "USD", "Operating Expenses"),
    ("MarketingExpense", "Marketing", "USD", "Operating Expenses"),
    ("SellingGeneralAndAdministrativeExpense", "SG&A", "USD", "Operating Expenses"),
    ("GeneralAndAdministrativeExpense", "General and Administrative", "USD", "Operating Expenses"),
    ("Depreciation", "Depreciation", "USD", "Operating Expenses"),
    ("OtherCostAndExpenseOperating", "Other Operating Expenses", "USD", "Operating Expenses"),
    ("ShareBasedCompensation", "Share-Based Compensation", "USD", "Operating Expenses"),
    ("ShortTermLeaseCost", "Short-Term Lease Cost", "USD", "Operating Expenses"),
    ("OperatingExpenses", "Total Operating Expenses", "USD", "Operating Expenses"),
    // Non-operating
    ("InterestExpenseBorrowings", "Interest Expense", "USD", "NonOperatingExpense"),
    ("InterestExpense", "Total Interest Expense", "USD", "NonOperatingExpense"),
    ("InterestExpenseDebt", "Interest Expense on Debt", "USD", "NonOperatingExpense"),
    ("InterestIncomeExpenseNet", "Net Interest Expense", "USD", "NonOperatingExpense"),
    ("OtherNonoperatingIncomeExpense", "Other Non-Operating Income (Expense)", "USD", "NonOperatingExpense"),
    ("ContractWithCustomerAssetCreditLossExpense", "Credit Loss Expense", "USD", "NonOperatingExpense"),
    ("AmortizationOfIntangibleAssets", "Amortization of Intangible Assets", "USD", "NonOperatingExpense"),
    ("ProvisionForDoubtfulAccounts", "Provision for Doubtful Accounts", "USD", "NonOperatingExpense"),
    ("DepreciationDepletionAndAmortization", "Depreciation and Amortization", "USD", "NonOperatingExpense"),
    // Income before tax
    (
        "IncomeLossFromContinuingOperationsBeforeIncomeTaxesMinorityInterestAndIncomeLossFromEquityMethodInvestments",
        "Income Before Equity Investments, Taxes, and Noncontrolling Interest",
        "USD",
        "Income Before Tax",
    ),
    (
        "IncomeLossFromContinuingOperationsBeforeIncomeTaxesExtraordinaryItemsNoncontrollingInterest",
        "Income Before Tax",
        "USD",
        "Income Before Tax",
    ),
    // Income taxes
    ("CurrentIncomeTaxExpenseBenefit", "Current Income Tax Expense (Benefit)", "USD", "Income Taxes"),
    ("CurrentFederalTaxExpenseBenefit", "Federal Income Tax Expense (Benefit)", "USD", "Income Taxes"),
    ("CurrentForeignTaxExpenseBenefit", "Foreign Income Tax Expense (Benefit)", "USD", "Income Taxes"),
    ("CurrentStateAndLocalTaxExpenseBenefit", "State and Local Income Tax Expense (Benefit)", "USD", "Income Taxes"),
    ("DeferredIncomeTaxExpenseBenefit", "Deferred Income Tax Expense (Benefit)", "USD", "Income Taxes"),
    ("IncomeTaxExpenseBenefit", "Provision for Income Taxes", "USD", "Income Taxes"),
    // Net income
    ("NetIncomeLoss", "Net Income (Loss)", "USD", "Net Income"),
    (
        "NetIncomeLossAvailableToCommonStockholdersBasic",
        "Net Income (Loss) Attributable to Common Stockholders (Basic)",
        "USD",
        "Net Income",
    ),
    (
        "NetIncomeLossAvailableToCommonStockholdersDiluted",
        "Net Income (Loss) Attributable to Common Stockholders (Diluted)",
        "USD",
        "Net Income",
    ),
    // Per share
    ("EarningsPerShareBasic", "Earnings Per Share (Basic)", "USD/shares", "Per Share Metrics"),
    ("EarningsPerShareDiluted", "Earnings Per Share (Diluted)", "USD/shares", "Per Share Metrics"),
    ("WeightedAverageNumberOfSharesOutstandingBasic", "Weighted-Average Shares (Basic)", "shares", "Per Share Metrics"),
    (
        "WeightedAverageNumberOfDilutedSharesOutstanding",
        "Weighted-Average Shares (Diluted)",
        "shares",
        "Per Share Metrics",
    ),
];
