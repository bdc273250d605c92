//! Conversions between Python dicts and Rust config/result types.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::arrivals::{CategoryDistribution, GeneratorConfig};
use crate::models::triage_queue::QueueOrdering;
use crate::orchestrator::{AreaConfig, OrchestratorConfig, SimulationReport, SlaPolicy, TickResult};

/// Extract an optional key, falling back to `default` when absent
fn extract_with_default<'py, T>(dict: &Bound<'py, PyDict>, key: &str, default: T) -> PyResult<T>
where
    T: FromPyObject<'py>,
{
    match dict.get_item(key)? {
        Some(value) if !value.is_none() => value.extract().map_err(|e| {
            PyValueError::new_err(format!("Invalid value for '{}': {}", key, e))
        }),
        _ => Ok(default),
    }
}

/// Parse the engine configuration; absent keys keep their defaults
pub fn parse_orchestrator_config(py_config: &Bound<'_, PyDict>) -> PyResult<OrchestratorConfig> {
    let defaults = OrchestratorConfig::default();

    let areas = match py_config.get_item("areas")? {
        Some(value) if !value.is_none() => {
            let list = value.downcast::<PyList>()?;
            let mut areas = Vec::with_capacity(list.len());
            for item in list.iter() {
                let area = item.downcast::<PyDict>()?;
                let name: String = extract_with_default(area, "name", String::new())?;
                let capacity: usize = extract_with_default(area, "capacity", 0)?;
                areas.push(AreaConfig::new(name, capacity));
            }
            areas
        }
        _ => defaults.areas.clone(),
    };

    let sla = match py_config.get_item("sla_minutes")? {
        Some(value) if !value.is_none() => {
            let limits: Vec<Option<u64>> = value.extract()?;
            let max_wait_minutes: [Option<u64>; 5] = limits.try_into().map_err(|_| {
                PyValueError::new_err("sla_minutes must list exactly 5 entries (C1..C5)")
            })?;
            SlaPolicy { max_wait_minutes }
        }
        _ => defaults.sla.clone(),
    };

    let area_ordering = match extract_with_default(py_config, "area_ordering", String::new())?.as_str() {
        "" => defaults.area_ordering,
        "urgent_first" => QueueOrdering::UrgentFirst,
        "least_urgent_first" => QueueOrdering::LeastUrgentFirst,
        other => {
            return Err(PyValueError::new_err(format!("Unknown area_ordering: {}", other)));
        }
    };

    Ok(OrchestratorConfig {
        ticks_per_day: extract_with_default(py_config, "ticks_per_day", defaults.ticks_per_day)?,
        units_per_tick: extract_with_default(py_config, "units_per_tick", defaults.units_per_tick)?,
        daily_quota: extract_with_default(py_config, "daily_quota", defaults.daily_quota)?,
        arrival_interval_ticks: extract_with_default(
            py_config,
            "arrival_interval_ticks",
            defaults.arrival_interval_ticks,
        )?,
        service_interval_ticks: extract_with_default(
            py_config,
            "service_interval_ticks",
            defaults.service_interval_ticks,
        )?,
        overflow_threshold: extract_with_default(
            py_config,
            "overflow_threshold",
            defaults.overflow_threshold,
        )?,
        overflow_batch: extract_with_default(py_config, "overflow_batch", defaults.overflow_batch)?,
        sla,
        areas,
        area_ordering,
        reprioritize_on_reassign: extract_with_default(
            py_config,
            "reprioritize_on_reassign",
            defaults.reprioritize_on_reassign,
        )?,
    })
}

/// Parse the generator section (`count`, `start_time`, `category_percentages`, ...)
pub fn parse_generator_config(py_gen: &Bound<'_, PyDict>) -> PyResult<GeneratorConfig> {
    let defaults = GeneratorConfig::default();

    let category_distribution = match py_gen.get_item("category_percentages")? {
        Some(value) if !value.is_none() => {
            let percentages: [u8; 5] = value.extract()?;
            CategoryDistribution { percentages }
        }
        _ => defaults.category_distribution.clone(),
    };

    Ok(GeneratorConfig {
        count: extract_with_default(py_gen, "count", defaults.count)?,
        start_time: extract_with_default(py_gen, "start_time", defaults.start_time)?,
        interval_units: extract_with_default(py_gen, "interval_units", defaults.interval_units)?,
        id_prefix: extract_with_default(py_gen, "id_prefix", defaults.id_prefix.clone())?,
        id_offset: extract_with_default(py_gen, "id_offset", defaults.id_offset)?,
        category_distribution,
        given_names: extract_with_default(py_gen, "given_names", defaults.given_names.clone())?,
        family_names: extract_with_default(py_gen, "family_names", defaults.family_names.clone())?,
        areas: extract_with_default(py_gen, "areas", defaults.areas.clone())?,
    })
}

pub fn tick_result_to_py(py: Python<'_>, result: &TickResult) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("tick", result.tick)?;
    dict.set_item("clock", result.clock)?;
    dict.set_item("admitted", result.admitted.clone())?;
    dict.set_item("dispatched", result.dispatched.clone())?;
    dict.set_item("in_flight", result.in_flight)?;
    dict.set_item("waiting", result.waiting)?;
    Ok(dict.unbind())
}

pub fn report_to_py(py: Python<'_>, report: &SimulationReport) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("ticks_executed", report.ticks_executed)?;
    dict.set_item("total_served", report.total_served)?;
    dict.set_item("still_waiting", report.still_waiting)?;

    let categories = PyList::empty_bound(py);
    for summary in &report.categories {
        let row = PyDict::new_bound(py);
        row.set_item("category", summary.category.level())?;
        row.set_item("average_wait", summary.average_wait)?;
        row.set_item("worst_wait", summary.worst_wait)?;
        row.set_item("served", summary.served)?;
        categories.append(row)?;
    }
    dict.set_item("categories", categories)?;

    let breaches = PyList::empty_bound(py);
    for breach in &report.breaches {
        let row = PyDict::new_bound(py);
        row.set_item("patient_id", &breach.patient_id)?;
        row.set_item("category", breach.category.level())?;
        row.set_item("wait_minutes", breach.wait_minutes)?;
        row.set_item("elapsed_at_close_minutes", breach.elapsed_at_close_minutes)?;
        breaches.append(row)?;
    }
    dict.set_item("breaches", breaches)?;

    let waiting = PyDict::new_bound(py);
    for count in &report.waiting_by_category {
        waiting.set_item(count.category.level(), count.waiting)?;
    }
    dict.set_item("waiting_by_category", waiting)?;

    Ok(dict.unbind())
}
