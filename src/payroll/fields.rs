//! Input and output field names of the payroll rule set.

/// Names of the raw inputs the payroll rules read.
pub mod inputs {
    /// Gross monthly pay.
    pub const GROSS_MONTHLY: &str = "grossMonthly";
    /// Paid days in the month, used for the daily rate.
    pub const PAID_DAYS_PER_MONTH: &str = "paidDaysPerMonth";
    /// Calendar days in the month, used to pro-rate the tax credit.
    pub const CALENDAR_DAYS_PER_MONTH: &str = "calendarDaysPerMonth";
    /// Monthly salaries paid per year (13 or 14 in most contracts).
    pub const MONTHS_PER_YEAR: &str = "monthsPerYear";
    /// Apprenticeship contract flag (0 or 1).
    pub const APPRENTICESHIP: &str = "apprenticeship";
    /// Public holidays not taken this month, paid at the daily rate.
    pub const UNUSED_HOLIDAY_DAYS: &str = "unusedHolidayDays";
}

/// Daily pay rate.
pub const DAILY_PAY: &str = "dailyPay";
/// Gross monthly pay rounded to cents.
pub const GROSS_MONTHLY: &str = "grossMonthly";
/// Gross annual pay.
pub const GROSS_ANNUAL: &str = "grossAnnual";
/// Pay for unused holidays.
pub const UNUSED_HOLIDAY_PAY: &str = "unusedHolidayPay";
/// Base for social contributions.
pub const CONTRIBUTION_BASE: &str = "contributionBase";
/// Contribution base rounded to the unit.
pub const CONTRIBUTION_BASE_ROUNDED: &str = "contributionBaseRounded";
/// Employee social security contribution.
pub const SOCIAL_CONTRIBUTION: &str = "socialContribution";
/// Supplementary health fund withholding.
pub const SUPPLEMENTARY_FUND: &str = "supplementaryFund";
/// Solidarity contribution.
pub const SOLIDARITY_CONTRIBUTION: &str = "solidarityContribution";
/// Social contributions deducted from the taxable base.
pub const TOTAL_SOCIAL_WITHHOLDINGS: &str = "totalSocialWithholdings";
/// Bilateral body contribution.
pub const BILATERAL_CONTRIBUTION: &str = "bilateralContribution";
/// Taxable monthly income.
pub const TAXABLE_MONTHLY: &str = "taxableMonthly";
/// Taxable annual income.
pub const TAXABLE_ANNUAL: &str = "taxableAnnual";
/// Monthly income tax before credits.
pub const GROSS_INCOME_TAX: &str = "grossIncomeTax";
/// Monthly employee tax credit.
pub const TAX_CREDIT: &str = "taxCredit";
/// Monthly income tax after credits.
pub const NET_INCOME_TAX: &str = "netIncomeTax";
/// Monthly regional surtax.
pub const REGIONAL_SURTAX: &str = "regionalSurtax";
/// Presumed annual income used for the bonus taper.
pub const PRESUMED_ANNUAL_INCOME: &str = "presumedAnnualIncome";
/// Monthly income bonus.
pub const INCOME_BONUS: &str = "incomeBonus";
/// Everything withheld from the monthly pay.
pub const TOTAL_WITHHOLDINGS: &str = "totalWithholdings";
/// Everything paid out before withholdings.
pub const TOTAL_COMPENSATION: &str = "totalCompensation";
/// Net monthly pay.
pub const NET_MONTHLY: &str = "netMonthly";
/// Net monthly pay without the income bonus.
pub const NET_WITHOUT_BONUS: &str = "netWithoutBonus";
/// Share of gross pay lost to withholdings.
pub const TAX_RATE: &str = "taxRate";
