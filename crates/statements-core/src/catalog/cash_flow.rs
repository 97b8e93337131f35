//! Standard US-GAAP cash-flow statement catalog.

pub(super) const CATEGORIES: &[&str] = &[
    "Operating Cash Flow",
    "Investing Cash Flow",
    "Financing Cash Flow",
    "Effect of Exchange Rates",
    "Net Change in Cash",
    "Ending Cash Balance",
];

/// `(concept id, label, unit, category)`
pub(super) const ENTRIES: &[(&str, &str, &str, &str)] = &[
    // Operating
    ("DepreciationDepletionAndAmortization", "Depreciation and amortization", "USD", "Operating Cash Flow"),
    ("ImpairmentOfLongLivedAssetsHeldForUse", "Impairment of long-lived assets", "USD", "Operating Cash Flow"),
    ("ProvisionForDoubtfulAccounts", "Provision for credit losses", "USD", "Operating Cash Flow"),
    ("ShareBasedCompensation", "Share-based compensation", "USD", "Operating Cash Flow"),
    ("OtherOperatingActivitiesCashFlowStatement", "Other operating activities", "USD", "Operating Cash Flow"),
    (
        "CashAndSecuritiesSegregatedUnderFederalAndOtherRegulations",
        "Segregated securities under federal and other regulations",
        "USD",
        "Operating Cash Flow",
    ),
    ("IncreaseDecreaseInAccountsReceivable", "Receivables from users, net", "USD", "Operating Cash Flow"),
    ("SecuritiesBorrowed", "Securities borrowed", "USD", "Operating Cash Flow"),
    ("IncreaseDecreaseInBrokerageReceivables", "Deposits with clearing organizations", "USD", "Operating Cash Flow"),
    ("IncreaseDecreaseInPrepaidExpense", "Current and non-current prepaid expenses", "USD", "Operating Cash Flow"),
    ("IncreaseDecreaseInOtherOperatingAssets", "Other current and non-current assets", "USD", "Operating Cash Flow"),
    (
        "IncreaseDecreaseInAccountsPayableAndAccruedLiabilities",
        "Accounts payable and accrued expenses",
        "USD",
        "Operating Cash Flow",
    ),
    ("IncreaseDecreaseInPayablesToCustomers", "Payables to users", "USD", "Operating Cash Flow"),
    ("SecuritiesLoaned", "Securities loaned", "USD", "Operating Cash Flow"),
    (
        "IncreaseDecreaseInOtherOperatingLiabilities",
        "Other current and non-current liabilities",
        "USD",
        "Operating Cash Flow",
    ),
    (
        "CashAndSecuritiesSegregatedUnderSecuritiesExchangeCommissionRegulation",
        "Cash and securities segregated under SEC regulation",
        "USD",
        "Operating Cash Flow",
    ),
    (
        "NetCashProvidedByUsedInOperatingActivities",
        "Net cash provided by (used in) operating activities",
        "USD",
        "Operating Cash Flow",
    ),
    ("IncomeTaxExpenseBenefit", "Income Tax expense", "USD", "Operating Cash Flow"),
    // Investing
    ("PaymentsForProceedsFromOtherInvestingActivities", "Other investing activities", "USD", "Investing Cash Flow"),
    ("PaymentsToDevelopSoftware", "Capitalization of internally developed software", "USD", "Investing Cash Flow"),
    (
        "PaymentsToAcquireBusinessesNetOfCashAcquired",
        "Acquisitions of a business, net of cash acquired",
        "USD",
        "Investing Cash Flow",
    ),
    (
        "PaymentsToAcquirePropertyPlantAndEquipment",
        "Purchase of property, plant, and equipment",
        "USD",
        "Investing Cash Flow",
    ),
    ("PaymentsToAcquireProductiveAssets", "Payments to acquire productive assets", "USD", "Investing Cash Flow"),
    ("PaymentsToAcquireOtherInvestments", "Payments to acquire other investments", "USD", "Investing Cash Flow"),
    (
        "PaymentsToAcquireAvailableForSaleSecurities",
        "Payments to acquire available-for-sale securities",
        "USD",
        "Investing Cash Flow",
    ),
    ("CapitalExpenditures", "Cash spent on assets more than 1 year", "USD", "Investing Cash Flow"),
    (
        "CapitalExpendituresIncurredButNotYetPaid",
        "Capital expenditures incurred but not yet paid",
        "USD",
        "Investing Cash Flow",
    ),
    (
        "NetCashProvidedByUsedInInvestingActivities",
        "Net cash used in investing activities",
        "USD",
        "Investing Cash Flow",
    ),
    // Financing
    (
        "ProceedsFromIssuanceInitialPublicOffering",
        "Proceeds from initial public offering, net of offering costs",
        "USD",
        "Financing Cash Flow",
    ),
    ("PaymentsForRepurchaseOfCommonStock", "Common stock repurchases", "USD", "Financing Cash Flow"),
    ("PaymentsOfDebtIssuanceCosts", "Payments of debt issuance costs", "USD", "Financing Cash Flow"),
    (
        "PaymentsToAcquireHeldToMaturitySecurities",
        "Payments to acquire held-to-maturity securities",
        "USD",
        "Financing Cash Flow",
    ),
    ("ProceedsFromIssuanceOfSecuredDebt", "Proceeds from issuance of secured debt", "USD", "Financing Cash Flow"),
    ("RepaymentsOfSecuredDebt", "Repayments of secured debt", "USD", "Financing Cash Flow"),
    (
        "NetCashProvidedByUsedInFinancingActivities",
        "Net cash provided by (used in) financing activities",
        "USD",
        "Financing Cash Flow",
    ),
    ("ProceedsFromIssuanceOfCommonStock", "Proceeds from issuance of common stock", "USD", "Financing Cash Flow"),
    // Exchange rates
    (
        "EffectOfExchangeRateOnCashCashEquivalentsRestrictedCashAndRestrictedCashEquivalents",
        "Effect of foreign exchange rate on cash",
        "USD",
        "Effect of Exchange Rates",
    ),
    // Net change
    (
        "CashCashEquivalentsRestrictedCashAndRestrictedCashEquivalentsPeriodIncreaseDecreaseIncludingExchangeRateEffect",
        "Changes in Cash",
        "USD",
        "Net Change in Cash",
    ),
    // Ending balance
    (
        "CashCashEquivalentsRestrictedCashAndRestrictedCashEquivalents",
        "Cash, cash equivalents, segregated cash and restricted cash, end of the period",
        "USD",
        "Ending Cash Balance",
    ),
    ("CashSegregatedUnderOtherRegulations", "Segregated cash, end of the period", "USD", "Ending Cash Balance"),
    ("CashAndCashEquivalentsAtCarryingValue", "Cash and cash equivalents, end of the period", "USD", "Ending Cash Balance"),
    (
        "RestrictedCashAndCashEquivalents",
        "Restricted cash (current and non-current), end of the period",
        "USD",
        "Ending Cash Balance",
    ),
];
