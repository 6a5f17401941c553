use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Compound growth
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_sip(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::growth::sip::SipInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fincalc_core::growth::sip::calculate_sip(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_step_up_sip(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::growth::sip::StepUpSipInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        fincalc_core::growth::sip::calculate_step_up_sip(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_lumpsum(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::growth::lumpsum::LumpsumInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        fincalc_core::growth::lumpsum::calculate_lumpsum(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_nps(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::growth::nps::NpsInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fincalc_core::growth::nps::calculate_nps(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_swp(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::growth::swp::SwpInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fincalc_core::growth::swp::calculate_swp(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_stp(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::growth::stp::StpInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fincalc_core::growth::stp::calculate_stp(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Loan amortization
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_emi(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::loan::emi::EmiInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fincalc_core::loan::emi::calculate_emi(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Brokerage and income tax
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_brokerage(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::charges::brokerage::BrokerageInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        fincalc_core::charges::brokerage::calculate_brokerage(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_tax(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::charges::income_tax::TaxInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        fincalc_core::charges::income_tax::calculate_tax(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Option pricing
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_black_scholes(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::options::black_scholes::BlackScholesInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fincalc_core::options::black_scholes::calculate_black_scholes(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Margin models
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_fo_margin(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::margin::fo::FoMarginInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fincalc_core::margin::fo::calculate_fo_margin(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_equity_margin(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::margin::equity::EquityMarginInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        fincalc_core::margin::equity::calculate_equity_margin(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_commodity_margin(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::margin::commodity::CommodityMarginInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fincalc_core::margin::commodity::calculate_commodity_margin(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_currency_margin(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::margin::currency::CurrencyMarginInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fincalc_core::margin::currency::calculate_currency_margin(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_equity_futures(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::margin::futures::EquityFuturesInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fincalc_core::margin::futures::calculate_equity_futures(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_mtf(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::margin::mtf::MtfInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fincalc_core::margin::mtf::calculate_mtf(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
