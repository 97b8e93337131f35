//! Standard US-GAAP balance sheet catalog.

pub(super) const CATEGORIES: &[&str] = &[
    "Total Assets",
    "Current Assets",
    "Non-Current Assets",
    "Total Liabilities",
    "Current Liabilities",
    "Non-Current Liabilities",
    "Equity",
    "Total Liabilities and Equity",
];

/// `(concept id, label, unit, category)`
pub(super) const ENTRIES: &[(&str, &str, &str, &str)] = &[
    ("Assets", "Total assets", "USD", "Total Assets"),
    // Current assets
    ("AssetsCurrent", "Total current assets", "USD", "Current Assets"),
    ("CashAndCashEquivalentsAtCarryingValue", "Cash and cash equivalents", "USD", "Current Assets"),
    ("AccountsReceivableNetCurrent", "Accounts receivable, net", "USD", "Current Assets"),
    ("InventoryNet", "Inventory, net", "USD", "Current Assets"),
    ("PrepaidExpenseCurrent", "Prepaid expenses", "USD", "Current Assets"),
    ("MarketableSecuritiesCurrent", "Marketable securities, current", "USD", "Current Assets"),
    ("DeferredTaxAssetsLiabilitiesNetCurrent", "Deferred tax assets, current", "USD", "Current Assets"),
    ("OtherAssetsCurrent", "Other current assets", "USD", "Current Assets"),
    (
        "AvailableForSaleSecuritiesDebtMaturitiesWithinOneYearFairValue",
        "Available-for-sale debt securities maturing within one year",
        "USD",
        "Current Assets",
    ),
    ("InventoryWorkInProcess", "Inventory, work in process", "USD", "Current Assets"),
    ("InventoryFinishedGoods", "Inventory, finished goods", "USD", "Current Assets"),
    // Non-current assets
    ("AssetsNoncurrent", "Total non-current assets", "USD", "Non-Current Assets"),
    ("PropertyPlantAndEquipmentNet", "Property, plant, and equipment, net", "USD", "Non-Current Assets"),
    ("OperatingLeaseRightOfUseAsset", "Operating lease right-of-use assets", "USD", "Non-Current Assets"),
    ("FinanceLeaseRightOfUseAsset", "Finance lease right-of-use assets", "USD", "Non-Current Assets"),
    ("Goodwill", "Goodwill", "USD", "Non-Current Assets"),
    ("IntangibleAssetsNetExcludingGoodwill", "Intangible assets, net", "USD", "Non-Current Assets"),
    ("LongTermInvestments", "Long-term investments", "USD", "Non-Current Assets"),
    ("DeferredTaxAssetsLiabilitiesNetNoncurrent", "Deferred tax assets, non-current", "USD", "Non-Current Assets"),
    ("PrepaidExpenseNoncurrent", "Prepaid expenses, non-current", "USD", "Non-Current Assets"),
    ("OtherAssetsNoncurrent", "Other non-current assets", "USD", "Non-Current Assets"),
    (
        "EquitySecuritiesWithoutReadilyDeterminableFairValueAmount",
        "Non-marketable equity securities",
        "USD",
        "Non-Current Assets",
    ),
    ("DeferredTaxAssetsGross", "Deferred tax assets, gross", "USD", "Non-Current Assets"),
    // Liabilities
    ("Liabilities", "Total liabilities", "USD", "Total Liabilities"),
    ("LiabilitiesCurrent", "Total current liabilities", "USD", "Current Liabilities"),
    ("AccountsPayableCurrent", "Accounts payable", "USD", "Current Liabilities"),
    ("AccruedLiabilitiesCurrent", "Accrued liabilities", "USD", "Current Liabilities"),
    ("DeferredRevenueCurrent", "Deferred revenue, current", "USD", "Current Liabilities"),
    ("ShortTermBorrowings", "Short-term debt", "USD", "Current Liabilities"),
    ("OperatingLeaseLiabilityCurrent", "Operating lease liabilities, current", "USD", "Current Liabilities"),
    ("FinanceLeaseLiabilityCurrent", "Finance lease liabilities, current", "USD", "Current Liabilities"),
    ("TaxesPayableCurrent", "Income taxes payable", "USD", "Current Liabilities"),
    ("OtherLiabilitiesCurrent", "Other current liabilities", "USD", "Current Liabilities"),
    (
        "OperatingLeasesFutureMinimumPaymentsDueCurrent",
        "Operating lease payments due within one year",
        "USD",
        "Current Liabilities",
    ),
    ("LiabilitiesNoncurrent", "Total non-current liabilities", "USD", "Non-Current Liabilities"),
    ("LongTermDebtNoncurrent", "Long-term debt", "USD", "Non-Current Liabilities"),
    ("DeferredRevenueNoncurrent", "Deferred revenue, non-current", "USD", "Non-Current Liabilities"),
    ("OperatingLeaseLiabilityNoncurrent", "Operating lease liabilities, non-current", "USD", "Non-Current Liabilities"),
    ("FinanceLeaseLiabilityNoncurrent", "Finance lease liabilities, non-current", "USD", "Non-Current Liabilities"),
    ("DeferredTaxLiabilitiesNoncurrent", "Deferred tax liabilities, non-current", "USD", "Non-Current Liabilities"),
    ("DeferredIncomeTaxLiabilities", "Deferred income tax liabilities", "USD", "Non-Current Liabilities"),
    ("AccruedRentNoncurrent", "Accrued rent, non-current", "USD", "Non-Current Liabilities"),
    ("OtherLiabilitiesNoncurrent", "Other non-current liabilities", "USD", "Non-Current Liabilities"),
    // Equity
    ("StockholdersEquity", "Total stockholders' equity", "USD", "Equity"),
    ("CommonStockValue", "Common stock", "USD", "Equity"),
    ("PreferredStockValue", "Preferred stock", "USD", "Equity"),
    ("AdditionalPaidInCapital", "Additional paid-in capital", "USD", "Equity"),
    ("RetainedEarningsAccumulatedDeficit", "Retained earnings (accumulated deficit)", "USD", "Equity"),
    ("TreasuryStockValue", "Treasury stock", "USD", "Equity"),
    (
        "AccumulatedOtherComprehensiveIncomeLossNetOfTax",
        "Accumulated other comprehensive income (loss)",
        "USD",
        "Equity",
    ),
    ("MinorityInterest", "Noncontrolling interest", "USD", "Equity"),
    ("CommonStockSharesIssued", "Common stock shares issued", "shares", "Equity"),
    ("CommonStockSharesOutstanding", "Common stock shares outstanding", "shares", "Equity"),
    (
        "LiabilitiesAndStockholdersEquity",
        "Total liabilities and stockholders' equity",
        "USD",
        "Total Liabilities and Equity",
    ),
];
