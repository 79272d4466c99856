//! Устройство, программа и запуск ядра OpenCL

use super::bindings::*;
use super::types::*;
use crate::{cl_check, cl_create};
use anyhow::{anyhow, bail, Context, Result};
use std::ffi::{c_char, c_void, CString};
use std::mem::size_of;
use std::ptr;
use tracing::debug;

/// Контекст и очередь команд на первом GPU первой платформы
pub struct OpenClDevice {
    device: cl_device_id,
    context: cl_context,
    queue: cl_command_queue,
}

impl OpenClDevice {
    pub fn new() -> Result<Self> {
        unsafe {
            let mut platform: cl_platform_id = ptr::null_mut();
            let mut num_platforms = 0;
            cl_check!(clGetPlatformIDs(1, &mut platform, &mut num_platforms))
                .context("Не удалось получить платформы OpenCL")?;
            if num_platforms == 0 {
                bail!("Платформы OpenCL не найдены");
            }

            // Поиск GPU устройства
            let mut device: cl_device_id = ptr::null_mut();
            let mut num_devices = 0;
            cl_check!(clGetDeviceIDs(platform, CL_DEVICE_TYPE_GPU, 1, &mut device, &mut num_devices))
                .context("GPU устройство не найдено")?;

            let context = cl_create!(clCreateContext(ptr::null(), 1, &device, None, ptr::null_mut()))?;
            let queue = match cl_create!(clCreateCommandQueue(context, device, 0)) {
                Ok(queue) => queue,
                Err(e) => {
                    clReleaseContext(context);
                    return Err(e);
                }
            };

            Ok(Self { device, context, queue })
        }
    }

    /// Компилирует `source` и создаёт ядро с точкой входа `name`
    pub fn build(&self, source: &str, name: &str) -> Result<OpenClKernel<'_>> {
        let entry = CString::new(name).context("Имя ядра содержит NUL")?;
        unsafe {
            let source_ptr = source.as_ptr() as *const c_char;
            let source_len = source.len();
            let program = Program(cl_create!(clCreateProgramWithSource(
                self.context,
                1,
                &source_ptr,
                &source_len
            ))?);

            let status = clBuildProgram(program.0, 1, &self.device, ptr::null(), None, ptr::null_mut());
            if status != CL_SUCCESS {
                let log = self.build_log(program.0);
                bail!("Ошибка компиляции программы `{name}` (код {status}):\n{log}");
            }

            let kernel = KernelHandle(cl_create!(clCreateKernel(program.0, entry.as_ptr()))?);
            debug!(kernel = name, "OpenCL program built");

            Ok(OpenClKernel {
                device: self,
                kernel,
                _program: program,
            })
        }
    }

    unsafe fn build_log(&self, program: cl_program) -> String {
        let mut log_size: usize = 0;
        clGetProgramBuildInfo(
            program,
            self.device,
            CL_PROGRAM_BUILD_LOG,
            0,
            ptr::null_mut(),
            &mut log_size,
        );
        let mut build_log = vec![0u8; log_size];
        clGetProgramBuildInfo(
            program,
            self.device,
            CL_PROGRAM_BUILD_LOG,
            log_size,
            build_log.as_mut_ptr() as *mut c_void,
            ptr::null_mut(),
        );
        String::from_utf8_lossy(&build_log)
            .trim_end_matches('\0')
            .to_string()
    }
}

impl Drop for OpenClDevice {
    fn drop(&mut self) {
        unsafe {
            clReleaseCommandQueue(self.queue);
            clReleaseContext(self.context);
        }
    }
}

struct Program(cl_program);

impl Drop for Program {
    fn drop(&mut self) {
        unsafe {
            clReleaseProgram(self.0);
        }
    }
}

struct KernelHandle(cl_kernel);

impl Drop for KernelHandle {
    fn drop(&mut self) {
        unsafe {
            clReleaseKernel(self.0);
        }
    }
}

struct Buffer(cl_mem);

impl Drop for Buffer {
    fn drop(&mut self) {
        unsafe {
            clReleaseMemObject(self.0);
        }
    }
}

/// Скомпилированное ядро. Ядро освобождается раньше программы.
pub struct OpenClKernel<'d> {
    device: &'d OpenClDevice,
    kernel: KernelHandle,
    _program: Program,
}

impl OpenClKernel<'_> {
    /// Запускает ядро на сетке `width x height` и читает выход обратно.
    ///
    /// Аргументы ядра: буферы `inputs`, буфер выхода, `width`, `height`.
    pub fn launch(&self, inputs: &[Vec<f64>], width: usize, height: usize) -> Result<Vec<f64>> {
        let out_len = width * height;
        let width_arg = cl_int::try_from(width).context("Ширина не помещается в int")?;
        let height_arg = cl_int::try_from(height).context("Высота не помещается в int")?;
        let context = self.device.context;
        let queue = self.device.queue;

        unsafe {
            let mut buffers = Vec::with_capacity(inputs.len() + 1);
            for (index, input) in inputs.iter().enumerate() {
                if input.is_empty() {
                    bail!("Входной буфер {index} пуст");
                }
                buffers.push(Buffer(cl_create!(clCreateBuffer(
                    context,
                    CL_MEM_READ_ONLY | CL_MEM_COPY_HOST_PTR,
                    input.len() * size_of::<f64>(),
                    input.as_ptr() as *mut c_void
                ))?));
            }
            buffers.push(Buffer(cl_create!(clCreateBuffer(
                context,
                CL_MEM_WRITE_ONLY,
                out_len * size_of::<f64>(),
                ptr::null_mut()
            ))?));

            let mut arg_index: cl_uint = 0;
            for buffer in &buffers {
                cl_check!(clSetKernelArg(
                    self.kernel.0,
                    arg_index,
                    size_of::<cl_mem>(),
                    &buffer.0 as *const cl_mem as *const c_void
                ))
                .with_context(|| format!("Аргумент ядра {arg_index}"))?;
                arg_index += 1;
            }
            for value in [&width_arg, &height_arg] {
                cl_check!(clSetKernelArg(
                    self.kernel.0,
                    arg_index,
                    size_of::<cl_int>(),
                    value as *const cl_int as *const c_void
                ))
                .with_context(|| format!("Аргумент ядра {arg_index}"))?;
                arg_index += 1;
            }

            let global_size = [width, height];
            let work_dim = if height > 1 { 2 } else { 1 };
            cl_check!(clEnqueueNDRangeKernel(
                queue,
                self.kernel.0,
                work_dim,
                ptr::null(),
                global_size.as_ptr(),
                ptr::null(),
                0,
                ptr::null(),
                ptr::null_mut()
            ))
            .context("Ошибка при запуске ядра")?;
            cl_check!(clFinish(queue)).context("Ошибка при ожидании завершения")?;

            let output = buffers.last().ok_or_else(|| anyhow!("Нет буфера выхода"))?;
            let mut result = vec![0.0f64; out_len];
            cl_check!(clEnqueueReadBuffer(
                queue,
                output.0,
                CL_TRUE,
                0,
                out_len * size_of::<f64>(),
                result.as_mut_ptr() as *mut c_void,
                0,
                ptr::null(),
                ptr::null_mut()
            ))
            .context("Ошибка при чтении результата")?;

            Ok(result)
        }
    }
}
