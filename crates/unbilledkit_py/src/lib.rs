use pyo3::create_exception;
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyBytes;
use unbilledkit_process::{
    C_CATEGORY_DEFAULT, N_BYTES_UPLOAD_MAX, SpecOutputFile, process_combined, process_single,
    validate_upload,
};
use unbilledkit_table::TransformError;

const N_BRIDGE_ABI_VERSION: u64 = 1;
const C_BRIDGE_CONTRACT_VERSION: &str = "unbilledkit.process.v1";
const C_BRIDGE_TRANSPORT: &str = "bytes";

create_exception!(_unbilledkit_rs, ParseError, PyValueError);
create_exception!(_unbilledkit_rs, SchemaError, PyValueError);
create_exception!(_unbilledkit_rs, ConfigError, PyValueError);
create_exception!(_unbilledkit_rs, WriteError, PyRuntimeError);

fn map_transform_error(exception: TransformError) -> PyErr {
    let c_message = exception.to_string();
    match exception {
        TransformError::Parse(_) => ParseError::new_err(c_message),
        TransformError::Schema { .. } => SchemaError::new_err(c_message),
        TransformError::Config(_) => ConfigError::new_err(c_message),
        TransformError::Write(_) => WriteError::new_err(c_message),
        TransformError::Table(_) => PyRuntimeError::new_err(c_message),
    }
}

fn derive_output_tuple(py: Python<'_>, output: SpecOutputFile) -> (String, Py<PyBytes>) {
    (output.file_name, PyBytes::new(py, &output.v_bytes).unbind())
}

#[pyfunction(name = "process_single")]
#[pyo3(signature = (data, category = C_CATEGORY_DEFAULT))]
fn process_single_py(
    py: Python<'_>,
    data: &[u8],
    category: &str,
) -> PyResult<(String, Py<PyBytes>)> {
    let output = py
        .allow_threads(|| process_single(data, category))
        .map_err(map_transform_error)?;
    Ok(derive_output_tuple(py, output))
}

#[pyfunction(name = "process_combined")]
fn process_combined_py(
    py: Python<'_>,
    data_a: &[u8],
    data_b: &[u8],
) -> PyResult<(String, Py<PyBytes>)> {
    let output = py
        .allow_threads(|| process_combined(data_a, data_b))
        .map_err(map_transform_error)?;
    Ok(derive_output_tuple(py, output))
}

#[pyfunction(name = "validate_upload")]
fn validate_upload_py(file_name: &str, n_bytes: usize) -> PyResult<()> {
    validate_upload(file_name, n_bytes).map_err(map_transform_error)
}

#[pymodule]
fn _unbilledkit_rs(module: &Bound<'_, PyModule>) -> PyResult<()> {
    let py = module.py();
    module.add_function(wrap_pyfunction!(process_single_py, module)?)?;
    module.add_function(wrap_pyfunction!(process_combined_py, module)?)?;
    module.add_function(wrap_pyfunction!(validate_upload_py, module)?)?;
    module.add("ParseError", py.get_type::<ParseError>())?;
    module.add("SchemaError", py.get_type::<SchemaError>())?;
    module.add("ConfigError", py.get_type::<ConfigError>())?;
    module.add("WriteError", py.get_type::<WriteError>())?;
    module.add("N_BYTES_UPLOAD_MAX", N_BYTES_UPLOAD_MAX)?;
    module.add("__bridge_abi__", N_BRIDGE_ABI_VERSION)?;
    module.add("__bridge_contract__", C_BRIDGE_CONTRACT_VERSION)?;
    module.add("__bridge_transport__", C_BRIDGE_TRANSPORT)?;
    Ok(())
}
